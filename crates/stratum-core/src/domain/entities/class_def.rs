//! Generated class definitions.
//!
//! A [`ClassDefinition`] is the structural description of one generated
//! artifact: its qualified name, owning [`Layer`], ordered fields, ordered
//! methods, and structural [`Tag`]s. Definitions are stored in a
//! [`ClassModel`](super::class_model::ClassModel) arena and referred to by
//! [`ClassId`]; two equal ids are the same class.

use std::fmt;

use crate::domain::naming;
use crate::domain::value_objects::{CrudOp, Layer};

/// Handle to a class in a `ClassModel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub(crate) usize);

impl ClassId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a generated class represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassKind {
    /// Layer-local class for one domain entity.
    Domain { entity: String },
    /// Aggregate entry point of a layer.
    Facade,
    /// Dependency-injection configuration of the generated application.
    Configuration,
}

/// Resolved type of a field, parameter, or return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Passed through as declared, e.g. `java.lang.Long`.
    Opaque(String),
    /// Another generated class.
    Generated { class: ClassId, layer: Layer },
    /// A generic type over resolved arguments, e.g. `List<Generated>`.
    Parameterized { raw: String, args: Vec<FieldType> },
}

/// Outer names recognised as collections for relation tagging.
const COLLECTION_NAMES: &[&str] = &["Collection", "List", "Set", "Queue", "Deque", "Iterable"];

impl FieldType {
    pub fn opaque(name: impl Into<String>) -> Self {
        Self::Opaque(name.into())
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque(_))
    }

    /// The generated class this type names directly, if any.
    pub fn generated_class(&self) -> Option<ClassId> {
        match self {
            Self::Generated { class, .. } => Some(*class),
            _ => None,
        }
    }

    /// Whether the outer type is a collection (`List`, `java.util.Set`, ...).
    pub fn is_collection(&self) -> bool {
        match self {
            Self::Parameterized { raw, .. } => {
                let (_, simple) = naming::split_qualified(raw);
                COLLECTION_NAMES.iter().any(|c| simple.ends_with(c))
            }
            _ => false,
        }
    }

    /// Element class of a collection over a generated class.
    pub fn element_class(&self) -> Option<ClassId> {
        match self {
            Self::Parameterized { args, .. } if self.is_collection() => {
                args.iter().find_map(FieldType::generated_class)
            }
            _ => None,
        }
    }

    /// Every generated class referenced anywhere in this type.
    pub fn referenced_classes(&self) -> Vec<(ClassId, Layer)> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references(&self, out: &mut Vec<(ClassId, Layer)>) {
        match self {
            Self::Opaque(_) => {}
            Self::Generated { class, layer } => out.push((*class, *layer)),
            Self::Parameterized { args, .. } => {
                for arg in args {
                    arg.collect_references(out);
                }
            }
        }
    }
}

/// A marker consumed by the emission pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// Class is a persistent entity.
    PersistentEntity,
    /// Class is bound to a storage table.
    Table { name: String },
    /// Field is a one-to-one association.
    OneToOne,
    /// Field is a one-to-many association.
    OneToMany,
    /// Class is a serializable root message type.
    SerializableRoot,
    /// Class is a process-managed component.
    Component { singleton: bool },
    /// Field is filled by dependency injection.
    Injected,
    /// Field receives the external persistence collaborator.
    PersistenceContext,
    /// Method is a bean factory.
    Bean { name: String },
    /// Class holds the dependency-injection configuration.
    Configuration,
    /// Free-form marker, for post-configuration hooks.
    Custom(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Private,
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub ty: FieldType,
    pub visibility: Visibility,
    pub tags: Vec<Tag>,
}

impl FieldDef {
    pub fn private(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Private,
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: FieldType,
}

/// Role of a generated method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodKind {
    Getter { field: String },
    Setter { field: String },
    Crud { op: CrudOp, entity: String },
    BeanFactory { class: ClassId },
    /// Added by a post-configuration hook.
    Custom,
}

/// Where a method body forwards to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delegation {
    /// Return the named field.
    ReadField { field: String },
    /// Assign the first parameter to the named field.
    WriteField { field: String },
    /// Call `method` on the facade of `layer` through the injected field.
    Facade { layer: Layer, method: String },
    /// Call the external persistence collaborator.
    PersistenceCollaborator { operation: &'static str },
    /// Return a fresh instance of a generated class.
    Instantiate { class: ClassId },
    /// Empty body.
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    pub name: String,
    pub params: Vec<Param>,
    /// `None` means no return value.
    pub returns: Option<FieldType>,
    pub kind: MethodKind,
    pub delegation: Delegation,
    pub tags: Vec<Tag>,
}

impl MethodDef {
    pub fn new(name: impl Into<String>, kind: MethodKind, delegation: Delegation) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: None,
            kind,
            delegation,
            tags: Vec::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.params.push(Param {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn returning(mut self, ty: FieldType) -> Self {
        self.returns = Some(ty);
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }
}

/// Progress of a class through its generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    /// Reserved by a reference; no fields or methods yet.
    Declared,
    Built,
}

/// One generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDefinition {
    pub(crate) id: ClassId,
    pub(crate) kind: ClassKind,
    pub(crate) layer: Layer,
    pub(crate) package: String,
    pub(crate) name: String,
    pub(crate) tags: Vec<Tag>,
    pub(crate) fields: Vec<FieldDef>,
    pub(crate) methods: Vec<MethodDef>,
    pub(crate) state: BuildState,
}

impl ClassDefinition {
    pub(crate) fn declared(
        id: ClassId,
        kind: ClassKind,
        layer: Layer,
        package: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            layer,
            package: package.into(),
            name: name.into(),
            tags: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            state: BuildState::Declared,
        }
    }

    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn kind(&self) -> &ClassKind {
        &self.kind
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualified_name(&self) -> String {
        naming::join_package(&self.package, &self.name)
    }

    /// Entity this class was generated from, for domain classes.
    pub fn entity(&self) -> Option<&str> {
        match &self.kind {
            ClassKind::Domain { entity } => Some(entity),
            _ => None,
        }
    }

    pub fn is_facade(&self) -> bool {
        self.kind == ClassKind::Facade
    }

    pub fn is_built(&self) -> bool {
        self.state == BuildState::Built
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn methods(&self) -> &[MethodDef] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&MethodDef> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// The injected field pointing at the facade one layer down.
    pub fn dependency_field(&self) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.has_tag(&Tag::Injected))
    }

    /// The generated class of the injected dependency, if any.
    pub fn dependency(&self) -> Option<ClassId> {
        self.dependency_field().and_then(|f| f.ty.generated_class())
    }

    // Mutation is for the generation pass and post-configuration hooks.

    pub fn add_tag(&mut self, tag: Tag) {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn add_field(&mut self, field: FieldDef) {
        self.fields.push(field);
    }

    pub fn add_method(&mut self, method: MethodDef) {
        self.methods.push(method);
    }

    pub(crate) fn mark_built(&mut self) {
        self.state = BuildState::Built;
    }
}
