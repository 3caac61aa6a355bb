use std::collections::HashMap;

use crate::domain::{
    entities::class_def::{ClassDefinition, ClassId, ClassKind, FieldType},
    error::{DomainError, DomainResult},
    naming,
    value_objects::Layer,
};

/// Arena of every class generated in one run.
///
/// Qualified names are unique. Domain classes are additionally indexed by
/// (entity, layer), which is what makes class construction idempotent.
#[derive(Debug, Clone, Default)]
pub struct ClassModel {
    classes: Vec<ClassDefinition>,
    by_name: HashMap<String, ClassId>,
    by_entity: HashMap<(String, Layer), ClassId>,
}

impl ClassModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new, empty class.
    ///
    /// Fails with [`DomainError::DuplicateClass`] when the qualified name is
    /// taken; the error carries the existing id so callers may reuse it.
    pub fn define(
        &mut self,
        kind: ClassKind,
        layer: Layer,
        package: &str,
        name: &str,
    ) -> DomainResult<ClassId> {
        let qualified = naming::join_package(package, name);
        if let Some(&existing) = self.by_name.get(&qualified) {
            return Err(DomainError::DuplicateClass {
                name: qualified,
                existing,
            });
        }

        let id = ClassId(self.classes.len());
        if let ClassKind::Domain { entity } = &kind {
            self.by_entity.insert((entity.clone(), layer), id);
        }
        self.classes
            .push(ClassDefinition::declared(id, kind, layer, package, name));
        self.by_name.insert(qualified, id);
        Ok(id)
    }

    pub fn get(&self, id: ClassId) -> &ClassDefinition {
        &self.classes[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: ClassId) -> &mut ClassDefinition {
        &mut self.classes[id.0]
    }

    /// Mutable access for post-configuration hooks.
    pub fn class_mut(&mut self, id: ClassId) -> Option<&mut ClassDefinition> {
        self.classes.get_mut(id.0)
    }

    pub fn find(&self, qualified_name: &str) -> Option<ClassId> {
        self.by_name.get(qualified_name).copied()
    }

    /// The layer-local class generated for an entity, if declared.
    pub fn domain_class(&self, entity: &str, layer: Layer) -> Option<ClassId> {
        self.by_entity.get(&(entity.to_string(), layer)).copied()
    }

    pub fn classes_in(&self, layer: Layer) -> impl Iterator<Item = &ClassDefinition> {
        self.classes.iter().filter(move |c| c.layer == layer)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassDefinition> {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Render a resolved type with qualified class names,
    /// e.g. `java.util.List<app.model.Product>`.
    pub fn render_type(&self, ty: &FieldType) -> String {
        match ty {
            FieldType::Opaque(name) => name.clone(),
            FieldType::Generated { class, .. } => self.get(*class).qualified_name(),
            FieldType::Parameterized { raw, args } => {
                let args: Vec<String> = args.iter().map(|a| self.render_type(a)).collect();
                format!("{raw}<{}>", args.join(", "))
            }
        }
    }

    /// Check that the model is fit for emission: every class is built and no
    /// field references a class of another layer.
    pub fn validate_complete(&self) -> DomainResult<()> {
        let pending: Vec<String> = self
            .classes
            .iter()
            .filter(|c| !c.is_built())
            .map(ClassDefinition::qualified_name)
            .collect();
        if !pending.is_empty() {
            return Err(DomainError::IncompleteModel { classes: pending });
        }

        for class in self.classes.iter().filter(|c| c.entity().is_some()) {
            for field in &class.fields {
                for (referenced, layer) in field.ty.referenced_classes() {
                    if layer != class.layer || self.get(referenced).layer != class.layer {
                        return Err(DomainError::InvalidWiring(format!(
                            "field '{}.{}' crosses from the {} layer into the {} layer",
                            class.qualified_name(),
                            field.name,
                            class.layer,
                            layer
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}
