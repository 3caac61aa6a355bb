//! Attribute type resolution.
//!
//! A declared type name is looked up in the app's type catalog (or taken as
//! an entity name) and its target representation is parsed into a
//! [`TypeExpr`]. The expression is then resolved for one layer:
//!
//! 1. a name that denotes a domain entity becomes that entity's class in the
//!    same layer, declared on first use;
//! 2. a name without arguments passes through as an opaque type;
//! 3. a parameterized name resolves each argument recursively.

use tracing::trace;

use crate::domain::{
    entities::{
        app::{App, Entity, EntityAttribute},
        class_def::FieldType,
        class_model::ClassModel,
    },
    error::{DomainError, DomainResult},
    generation::class_builder,
    value_objects::Layer,
};

/// Parsed target representation, e.g. `java.util.Map<String, app.Product>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    pub name: String,
    pub args: Vec<TypeExpr>,
}

impl TypeExpr {
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn is_parameterized(&self) -> bool {
        !self.args.is_empty()
    }

    pub fn parse(expression: &str) -> DomainResult<Self> {
        let mut parser = Parser {
            src: expression,
            pos: 0,
        };
        let expr = parser.expr()?;
        parser.skip_ws();
        if parser.pos != expression.len() {
            return Err(parser.error(format!(
                "unexpected '{}' at offset {}",
                &expression[parser.pos..],
                parser.pos
            )));
        }
        Ok(expr)
    }
}

struct Parser<'s> {
    src: &'s str,
    pos: usize,
}

impl Parser<'_> {
    fn expr(&mut self) -> DomainResult<TypeExpr> {
        self.skip_ws();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '<' || c == '>' || c == ',' || c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
        let name = &self.src[start..self.pos];
        if name.is_empty() {
            return Err(self.error("missing type name"));
        }

        let mut args = Vec::new();
        self.skip_ws();
        if self.peek() == Some('<') {
            self.pos += 1;
            loop {
                args.push(self.expr()?);
                self.skip_ws();
                match self.peek() {
                    Some(',') => self.pos += 1,
                    Some('>') => {
                        self.pos += 1;
                        break;
                    }
                    _ => return Err(self.error("unbalanced '<'")),
                }
            }
        }

        Ok(TypeExpr {
            name: name.to_string(),
            args,
        })
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek().filter(|c| c.is_whitespace()) {
            self.pos += c.len_utf8();
        }
    }

    fn error(&self, reason: impl Into<String>) -> DomainError {
        DomainError::MalformedType {
            expression: self.src.to_string(),
            reason: reason.into(),
        }
    }
}

/// Resolves attribute types against one app.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    app: &'a App,
}

impl<'a> TypeResolver<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }

    /// Target representation of an attribute's declared type.
    ///
    /// The catalog wins; a bare entity name resolves to the entity's
    /// qualified name.
    pub fn representation(
        &self,
        entity: &Entity,
        attribute: &EntityAttribute,
    ) -> DomainResult<String> {
        if let Some(ty) = self.app.find_type(&attribute.type_name) {
            return Ok(ty.class_name.clone());
        }
        if let Some(target) = self.app.find_entity(&attribute.type_name) {
            return Ok(self.app.qualified_entity_name(target));
        }
        Err(DomainError::UnresolvedType {
            type_name: attribute.type_name.clone(),
            entity: entity.name.clone(),
            attribute: attribute.name.clone(),
        })
    }

    /// Resolve an attribute for `layer`, declaring referenced entity classes
    /// in that layer as needed.
    pub fn resolve_attribute(
        &self,
        model: &mut ClassModel,
        entity: &Entity,
        attribute: &EntityAttribute,
        layer: Layer,
    ) -> DomainResult<FieldType> {
        let repr = self.representation(entity, attribute)?;
        let expr = TypeExpr::parse(&repr)?;
        let resolved = self.resolve(model, &expr, layer)?;
        trace!(
            entity = %entity.name,
            attribute = %attribute.name,
            %layer,
            repr = %repr,
            "resolved attribute type"
        );
        Ok(resolved)
    }

    pub fn resolve(
        &self,
        model: &mut ClassModel,
        expr: &TypeExpr,
        layer: Layer,
    ) -> DomainResult<FieldType> {
        if let Some(entity) = self.entity_named(&expr.name) {
            if expr.is_parameterized() {
                return Err(DomainError::MalformedType {
                    expression: expr.name.clone(),
                    reason: format!("entity '{}' takes no type arguments", entity.name),
                });
            }
            let class = class_builder::declare(model, self.app, entity, layer)?;
            return Ok(FieldType::Generated { class, layer });
        }

        if !expr.is_parameterized() {
            return Ok(FieldType::Opaque(expr.name.clone()));
        }

        let args = expr
            .args
            .iter()
            .map(|arg| self.resolve(model, arg, layer))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(FieldType::Parameterized {
            raw: expr.name.clone(),
            args,
        })
    }

    /// The entity a type name denotes, by qualified or simple name.
    fn entity_named(&self, name: &str) -> Option<&'a Entity> {
        self.app
            .entities
            .iter()
            .find(|e| e.name == name || self.app.qualified_entity_name(e) == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop() -> App {
        App::new("Shop")
            .with_base_package("app.")
            .with_standard_types()
            .with_type("Products", "java.util.List<app.Product>")
            .with_type("Broken", "java.util.List<app.Product")
            .with_entity(
                Entity::new("Order")
                    .with_attribute("id", "Long")
                    .with_attribute("item", "Product")
                    .with_attribute("lines", "Products"),
            )
            .with_entity(Entity::new("Product").with_attribute("id", "Long"))
    }

    #[test]
    fn parse_nested_expression() {
        let expr = TypeExpr::parse("java.util.Map<String, java.util.List<app.Product>>").unwrap();
        assert_eq!(expr.name, "java.util.Map");
        assert_eq!(expr.args.len(), 2);
        assert_eq!(expr.args[0], TypeExpr::simple("String"));
        assert_eq!(expr.args[1].args, vec![TypeExpr::simple("app.Product")]);
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["", "List<", "List<>", "List<A,>", "List<A>>", "A B"] {
            assert!(
                matches!(TypeExpr::parse(bad), Err(DomainError::MalformedType { .. })),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn opaque_types_pass_through() {
        let app = shop();
        let mut model = ClassModel::new();
        let order = app.find_entity("Order").unwrap();
        let attribute = order.attribute("id").unwrap();
        let ty = TypeResolver::new(&app)
            .resolve_attribute(&mut model, order, attribute, Layer::Persistence)
            .unwrap();
        assert_eq!(ty, FieldType::opaque("java.lang.Long"));
        assert!(model.is_empty());
    }

    #[test]
    fn entity_reference_declares_layer_local_class() {
        let app = shop();
        let mut model = ClassModel::new();
        let order = app.find_entity("Order").unwrap();
        let attribute = order.attribute("item").unwrap();
        let ty = TypeResolver::new(&app)
            .resolve_attribute(&mut model, order, attribute, Layer::Transport)
            .unwrap();

        let product = model.domain_class("Product", Layer::Transport).unwrap();
        assert_eq!(
            ty,
            FieldType::Generated {
                class: product,
                layer: Layer::Transport
            }
        );
        assert_eq!(model.get(product).qualified_name(), "app.dto.Product");
    }

    #[test]
    fn collection_argument_is_substituted() {
        let app = shop();
        let mut model = ClassModel::new();
        let order = app.find_entity("Order").unwrap();
        let attribute = order.attribute("lines").unwrap();
        let ty = TypeResolver::new(&app)
            .resolve_attribute(&mut model, order, attribute, Layer::Persistence)
            .unwrap();

        let product = model.domain_class("Product", Layer::Persistence).unwrap();
        assert!(ty.is_collection());
        assert_eq!(ty.element_class(), Some(product));
        assert_eq!(model.render_type(&ty), "java.util.List<app.model.Product>");
    }

    #[test]
    fn unknown_type_is_unresolved() {
        let app = shop();
        let ghost = Entity::new("Ghost").with_attribute("x", "Nope");
        let err = TypeResolver::new(&app)
            .resolve_attribute(
                &mut ClassModel::new(),
                &ghost,
                &ghost.attributes[0],
                Layer::Business,
            )
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::UnresolvedType {
                type_name: "Nope".into(),
                entity: "Ghost".into(),
                attribute: "x".into()
            }
        );
    }

    #[test]
    fn malformed_catalog_entry_fails_resolution() {
        let app = shop();
        let entity = Entity::new("Order").with_attribute("bad", "Broken");
        let err = TypeResolver::new(&app)
            .resolve_attribute(
                &mut ClassModel::new(),
                &entity,
                &entity.attributes[0],
                Layer::Persistence,
            )
            .unwrap_err();
        assert!(err.is_resolution_failure());
    }
}
