//! Per-layer generation policy.
//!
//! One table drives every layer-parameterized builder: package segments,
//! facade naming, structural tags, and where CRUD bodies delegate.

use crate::domain::entities::class_def::{Delegation, FieldType, Tag};
use crate::domain::naming;
use crate::domain::value_objects::{CrudOp, Layer};

/// Class-level tagging applied by the class builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassTagging {
    None,
    /// Persistent entity bound to a table named after the entity.
    PersistentTable,
    SerializableRoot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerPolicy {
    pub layer: Layer,
    /// Package segment for domain classes, below the base package.
    pub class_package: &'static str,
    /// Package segment for the layer facade.
    pub facade_package: &'static str,
    /// Appended to the application name to form the facade name.
    pub facade_suffix: &'static str,
    pub class_tagging: ClassTagging,
    /// Whether fields referencing generated classes get relation tags.
    pub relation_tags: bool,
}

static POLICIES: [LayerPolicy; 3] = [
    LayerPolicy {
        layer: Layer::Persistence,
        class_package: "model",
        facade_package: "dao",
        facade_suffix: "DAOService",
        class_tagging: ClassTagging::PersistentTable,
        relation_tags: true,
    },
    LayerPolicy {
        layer: Layer::Business,
        class_package: "bo",
        facade_package: "biz",
        facade_suffix: "BizService",
        class_tagging: ClassTagging::None,
        relation_tags: false,
    },
    LayerPolicy {
        layer: Layer::Transport,
        class_package: "dto",
        facade_package: "service",
        facade_suffix: "Service",
        class_tagging: ClassTagging::SerializableRoot,
        relation_tags: false,
    },
];

pub fn policy_for(layer: Layer) -> &'static LayerPolicy {
    match layer {
        Layer::Persistence => &POLICIES[0],
        Layer::Business => &POLICIES[1],
        Layer::Transport => &POLICIES[2],
    }
}

/// Package segment of the generated configuration class.
pub const CONFIG_PACKAGE: &str = "config";

/// Suffix of the generated configuration class name.
pub const CONFIG_SUFFIX: &str = "Config";

/// Field holding the external persistence collaborator on the lowest facade.
pub const PERSISTENCE_CONTEXT_FIELD: &str = "entityManager";

/// Type of the persistence collaborator field.
pub const PERSISTENCE_CONTEXT_TYPE: &str = "javax.persistence.EntityManager";

/// List type returned by `list<E>` methods.
pub const LIST_TYPE: &str = "java.util.List";

impl LayerPolicy {
    pub fn class_package(&self, base: &str) -> String {
        naming::join_package(base, self.class_package)
    }

    pub fn facade_package(&self, base: &str) -> String {
        naming::join_package(base, self.facade_package)
    }

    /// e.g. `ShopDAOService`.
    pub fn facade_name(&self, app_name: &str) -> String {
        format!("{}{}", naming::upper_first(app_name), self.facade_suffix)
    }

    pub fn class_tags(&self, entity: &str) -> Vec<Tag> {
        match self.class_tagging {
            ClassTagging::None => Vec::new(),
            ClassTagging::PersistentTable => vec![
                Tag::PersistentEntity,
                Tag::Table {
                    name: entity.to_string(),
                },
            ],
            ClassTagging::SerializableRoot => vec![Tag::SerializableRoot],
        }
    }

    /// Relation tag for a field of the given resolved type, if any.
    pub fn field_relation(&self, ty: &FieldType) -> Option<Tag> {
        if !self.relation_tags {
            return None;
        }
        match ty {
            FieldType::Generated { .. } => Some(Tag::OneToOne),
            FieldType::Parameterized { .. } if ty.element_class().is_some() => {
                Some(Tag::OneToMany)
            }
            _ => None,
        }
    }

    pub fn facade_tags(&self) -> Vec<Tag> {
        vec![Tag::Component { singleton: true }]
    }

    /// Whether the facade of this layer holds the persistence collaborator.
    pub fn holds_persistence_context(&self) -> bool {
        self.layer.is_lowest()
    }

    /// Delegation target of a CRUD method: the same operation one layer
    /// down, or the persistence collaborator at the bottom.
    pub fn crud_delegation(&self, op: CrudOp, entity: &str) -> Delegation {
        match self.layer.below() {
            Some(below) => Delegation::Facade {
                layer: below,
                method: op.method_name(entity),
            },
            None => Delegation::PersistenceCollaborator {
                operation: op.persistence_operation(),
            },
        }
    }
}
