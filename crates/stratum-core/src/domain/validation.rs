use std::collections::HashSet;

use crate::domain::{
    entities::app::{App, Entity},
    error::DomainError,
    naming,
};

/// Centralized checks on the input domain model.
///
/// Runs before any class is generated, so a malformed model fails without
/// partial output.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_app(app: &App) -> Result<(), DomainError> {
        if app.name.trim().is_empty() {
            return Err(DomainError::InvalidModel("app name cannot be empty".into()));
        }
        if !naming::is_identifier(&app.name) {
            return Err(DomainError::InvalidModel(format!(
                "app name '{}' is not a valid identifier",
                app.name
            )));
        }

        let mut entities = HashSet::new();
        for entity in &app.entities {
            Self::validate_entity(entity)?;
            if !entities.insert(entity.name.as_str()) {
                return Err(DomainError::InvalidModel(format!(
                    "entity '{}' is declared more than once",
                    entity.name
                )));
            }
        }

        let mut types = HashSet::new();
        for ty in &app.types {
            if ty.name.trim().is_empty() || ty.class_name.trim().is_empty() {
                return Err(DomainError::InvalidModel(format!(
                    "type '{}' needs both a name and a class name",
                    ty.name
                )));
            }
            if !types.insert(ty.name.as_str()) {
                return Err(DomainError::InvalidModel(format!(
                    "type '{}' is declared more than once",
                    ty.name
                )));
            }
        }

        Ok(())
    }

    pub fn validate_entity(entity: &Entity) -> Result<(), DomainError> {
        if !naming::is_identifier(&entity.name) {
            return Err(DomainError::InvalidModel(format!(
                "entity name '{}' is not a valid identifier",
                entity.name
            )));
        }
        // The lower-cased name becomes the CRUD parameter name.
        let parameter = naming::lower_first(&entity.name);
        if naming::is_reserved(&entity.name) || naming::is_reserved(&parameter) {
            return Err(DomainError::InvalidModel(format!(
                "entity name '{}' clashes with the reserved word '{parameter}'",
                entity.name
            )));
        }

        let mut seen = HashSet::new();
        for attribute in &entity.attributes {
            if !naming::is_identifier(&attribute.name) {
                return Err(DomainError::InvalidModel(format!(
                    "attribute '{}.{}' is not a valid identifier",
                    entity.name, attribute.name
                )));
            }
            if naming::is_reserved(&attribute.name) {
                return Err(DomainError::InvalidModel(format!(
                    "attribute '{}.{}' is a reserved word",
                    entity.name, attribute.name
                )));
            }
            if attribute.type_name.trim().is_empty() {
                return Err(DomainError::InvalidModel(format!(
                    "attribute '{}.{}' has no type",
                    entity.name, attribute.name
                )));
            }
            if !seen.insert(attribute.name.as_str()) {
                return Err(DomainError::InvalidModel(format!(
                    "attribute '{}.{}' is declared more than once",
                    entity.name, attribute.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_app() {
        let app = App::new("Shop")
            .with_standard_types()
            .with_entity(Entity::new("Order").with_attribute("id", "Long"));
        assert!(DomainValidator::validate_app(&app).is_ok());
    }

    #[test]
    fn rejects_empty_app_name() {
        assert!(DomainValidator::validate_app(&App::new("  ")).is_err());
    }

    #[test]
    fn rejects_duplicate_entities() {
        let app = App::new("Shop")
            .with_entity(Entity::new("Order"))
            .with_entity(Entity::new("Order"));
        let err = DomainValidator::validate_app(&app).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn rejects_duplicate_attributes() {
        let entity = Entity::new("Order")
            .with_attribute("id", "Long")
            .with_attribute("id", "String");
        assert!(DomainValidator::validate_entity(&entity).is_err());
    }

    #[test]
    fn rejects_invalid_identifiers() {
        assert!(DomainValidator::validate_entity(&Entity::new("Order Line")).is_err());
        assert!(
            DomainValidator::validate_entity(&Entity::new("Order").with_attribute("2x", "Long"))
                .is_err()
        );
    }

    #[test]
    fn rejects_names_that_generate_reserved_words() {
        let err = DomainValidator::validate_entity(&Entity::new("Class")).unwrap_err();
        assert!(err.to_string().contains("'class'"));

        let entity = Entity::new("Order").with_attribute("new", "Boolean");
        assert!(DomainValidator::validate_entity(&entity).is_err());

        assert!(DomainValidator::validate_entity(&Entity::new("Classroom")).is_ok());
    }

    #[test]
    fn rejects_duplicate_types() {
        let app = App::new("Shop")
            .with_type("Money", "java.math.BigDecimal")
            .with_type("Money", "java.lang.Double");
        assert!(DomainValidator::validate_app(&app).is_err());
    }
}
