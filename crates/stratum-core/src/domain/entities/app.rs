//! The input domain model: `App`, `Entity`, `EntityAttribute`, `TypeDef`.
//!
//! These are plain data loaded by a `DomainModelStore`. They are immutable for
//! the duration of a generation run and are the single source of truth for
//! what gets generated.

use serde::{Deserialize, Serialize};

/// Root of a domain model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    /// Application name; drives facade and configuration class names.
    pub name: String,
    /// Base namespace for every generated class, e.g. `"app."` or `"com.shop"`.
    #[serde(default)]
    pub base_package: Option<String>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    /// Type catalog consulted when resolving attribute types.
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

/// One domain entity; becomes one class per layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    /// Owning namespace, used only when the app has no base package.
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub attributes: Vec<EntityAttribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAttribute {
    pub name: String,
    /// Name of a [`TypeDef`] in the catalog, or of an entity.
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Maps a logical type name to its concrete target representation.
///
/// The representation may be parameterized: `java.util.List<app.Product>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,
    pub class_name: String,
}

/// Catalog entries added by [`App::with_standard_types`].
const STANDARD_TYPES: &[(&str, &str)] = &[
    ("Long", "java.lang.Long"),
    ("Integer", "java.lang.Integer"),
    ("String", "java.lang.String"),
    ("Boolean", "java.lang.Boolean"),
    ("Double", "java.lang.Double"),
    ("BigDecimal", "java.math.BigDecimal"),
    ("Date", "java.util.Date"),
];

impl App {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_package: None,
            entities: Vec::new(),
            types: Vec::new(),
        }
    }

    pub fn with_base_package(mut self, base_package: impl Into<String>) -> Self {
        self.base_package = Some(base_package.into());
        self
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn with_type(mut self, name: impl Into<String>, class_name: impl Into<String>) -> Self {
        self.types.push(TypeDef {
            name: name.into(),
            class_name: class_name.into(),
        });
        self
    }

    /// Add the common scalar types (`Long`, `String`, ...) to the catalog.
    ///
    /// Entries already present by name are left untouched.
    pub fn with_standard_types(mut self) -> Self {
        for (name, class_name) in STANDARD_TYPES {
            if self.find_type(name).is_none() {
                self = self.with_type(*name, *class_name);
            }
        }
        self
    }

    pub fn find_entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub fn find_type(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|t| t.name == name)
    }

    /// The base package without a trailing separator, if one is set.
    pub fn base_namespace(&self) -> Option<&str> {
        self.base_package
            .as_deref()
            .map(|p| p.trim_end_matches('.'))
            .filter(|p| !p.is_empty())
    }

    /// Namespace an entity lives in: the app base package when set, otherwise
    /// the entity's own namespace.
    pub fn namespace_of<'a>(&'a self, entity: &'a Entity) -> &'a str {
        self.base_namespace()
            .or_else(|| {
                entity
                    .namespace
                    .as_deref()
                    .map(|ns| ns.trim_end_matches('.'))
            })
            .unwrap_or("")
    }

    /// Domain-qualified name of an entity, e.g. `app.Product`.
    pub fn qualified_entity_name(&self, entity: &Entity) -> String {
        crate::domain::naming::join_package(self.namespace_of(entity), &entity.name)
    }
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            attributes: Vec::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.attributes.push(EntityAttribute {
            name: name.into(),
            type_name: type_name.into(),
        });
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&EntityAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_package_trailing_dot_is_ignored() {
        let app = App::new("Shop").with_base_package("app.");
        assert_eq!(app.base_namespace(), Some("app"));

        let product = Entity::new("Product");
        assert_eq!(app.qualified_entity_name(&product), "app.Product");
    }

    #[test]
    fn entity_namespace_used_without_base_package() {
        let app = App::new("Shop");
        let product = Entity::new("Product").with_namespace("com.shop.catalog");
        assert_eq!(app.qualified_entity_name(&product), "com.shop.catalog.Product");
    }

    #[test]
    fn standard_types_do_not_override_catalog() {
        let app = App::new("Shop")
            .with_type("Long", "long")
            .with_standard_types();

        assert_eq!(app.find_type("Long").unwrap().class_name, "long");
        assert_eq!(app.find_type("String").unwrap().class_name, "java.lang.String");
    }

    #[test]
    fn attributes_deserialize_type_key() {
        let json = r#"{"name": "id", "type": "Long"}"#;
        let attr: EntityAttribute = serde_json::from_str(json).unwrap();
        assert_eq!(attr.type_name, "Long");
    }
}
