use tracing::debug;

use crate::domain::{
    entities::{
        app::{App, Entity},
        class_def::{ClassId, ClassKind, Delegation, FieldDef, MethodDef, MethodKind},
        class_model::ClassModel,
    },
    error::{DomainError, DomainResult},
    generation::type_resolver::TypeResolver,
    naming,
    value_objects::Layer,
};

/// Reserve the class of `entity` in `layer`, or return the one already there.
pub fn declare(
    model: &mut ClassModel,
    app: &App,
    entity: &Entity,
    layer: Layer,
) -> DomainResult<ClassId> {
    if let Some(existing) = model.domain_class(&entity.name, layer) {
        return Ok(existing);
    }
    let package = layer.policy().class_package(app.namespace_of(entity));
    model.define(
        ClassKind::Domain {
            entity: entity.name.clone(),
        },
        layer,
        &package,
        &entity.name,
    )
}

/// Builds layer-local classes for domain entities.
///
/// Building is idempotent per (entity, layer): a second request returns the
/// class built the first time. Entity classes referenced by a built class
/// are built as well, so the model never holds a class that was only
/// declared by a reference.
#[derive(Debug, Clone, Copy)]
pub struct ClassBuilder<'a> {
    app: &'a App,
}

impl<'a> ClassBuilder<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }

    pub fn build(
        &self,
        model: &mut ClassModel,
        entity: &Entity,
        layer: Layer,
    ) -> DomainResult<ClassId> {
        let id = declare(model, self.app, entity, layer)?;
        if model.get(id).is_built() {
            debug!(entity = %entity.name, %layer, "class already exists, reusing");
            return Ok(id);
        }

        let mut pending = vec![id];
        while let Some(class) = pending.pop() {
            if model.get(class).is_built() {
                continue;
            }
            let entity = self.entity_of(model, class)?;
            self.populate(model, class, entity, layer)?;

            pending.extend(
                model
                    .get(class)
                    .fields()
                    .iter()
                    .flat_map(|f| f.ty.referenced_classes())
                    .map(|(referenced, _)| referenced)
                    .filter(|referenced| !model.get(*referenced).is_built()),
            );
        }

        Ok(id)
    }

    /// Build by entity name; unknown names are resolution failures.
    pub fn build_named(
        &self,
        model: &mut ClassModel,
        name: &str,
        layer: Layer,
    ) -> DomainResult<ClassId> {
        let entity = self
            .app
            .find_entity(name)
            .ok_or_else(|| DomainError::UnresolvedEntity {
                name: name.to_string(),
            })?;
        self.build(model, entity, layer)
    }

    fn entity_of(&self, model: &ClassModel, class: ClassId) -> DomainResult<&'a Entity> {
        let name = model.get(class).entity().ok_or_else(|| {
            DomainError::InvalidWiring(format!("class {class} is not a domain class"))
        })?;
        self.app
            .find_entity(name)
            .ok_or_else(|| DomainError::UnresolvedEntity {
                name: name.to_string(),
            })
    }

    fn populate(
        &self,
        model: &mut ClassModel,
        class: ClassId,
        entity: &Entity,
        layer: Layer,
    ) -> DomainResult<()> {
        let policy = layer.policy();
        let resolver = TypeResolver::new(self.app);

        let mut fields = Vec::with_capacity(entity.attributes.len());
        let mut methods = Vec::with_capacity(entity.attributes.len() * 2);
        for attribute in &entity.attributes {
            let ty = resolver.resolve_attribute(model, entity, attribute, layer)?;
            let suffix = naming::upper_first(&attribute.name);

            methods.push(
                MethodDef::new(
                    format!("get{suffix}"),
                    MethodKind::Getter {
                        field: attribute.name.clone(),
                    },
                    Delegation::ReadField {
                        field: attribute.name.clone(),
                    },
                )
                .returning(ty.clone()),
            );
            methods.push(
                MethodDef::new(
                    format!("set{suffix}"),
                    MethodKind::Setter {
                        field: attribute.name.clone(),
                    },
                    Delegation::WriteField {
                        field: attribute.name.clone(),
                    },
                )
                .with_param(attribute.name.clone(), ty.clone()),
            );

            let mut field = FieldDef::private(attribute.name.clone(), ty);
            if let Some(tag) = policy.field_relation(&field.ty) {
                field = field.with_tag(tag);
            }
            fields.push(field);
        }

        let def = model.get_mut(class);
        for tag in policy.class_tags(&entity.name) {
            def.add_tag(tag);
        }
        for field in fields {
            def.add_field(field);
        }
        for method in methods {
            def.add_method(method);
        }
        def.mark_built();

        debug!(
            class = %def.qualified_name(),
            %layer,
            fields = def.fields().len(),
            "built class"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::class_def::{FieldType, Tag, Visibility};

    fn shop() -> App {
        App::new("Shop")
            .with_base_package("app.")
            .with_standard_types()
            .with_type("Products", "java.util.List<app.Product>")
            .with_entity(
                Entity::new("Order")
                    .with_attribute("id", "Long")
                    .with_attribute("item", "Product")
                    .with_attribute("lines", "Products"),
            )
            .with_entity(
                Entity::new("Product")
                    .with_attribute("id", "Long")
                    .with_attribute("name", "String"),
            )
            .with_entity(
                Entity::new("Category")
                    .with_attribute("id", "Long")
                    .with_attribute("parent", "Category"),
            )
    }

    #[test]
    fn fields_and_accessors_in_attribute_order() {
        let app = shop();
        let mut model = ClassModel::new();
        let id = ClassBuilder::new(&app)
            .build_named(&mut model, "Product", Layer::Business)
            .unwrap();

        let class = model.get(id);
        assert_eq!(class.qualified_name(), "app.bo.Product");
        let fields: Vec<_> = class.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, ["id", "name"]);
        assert!(class.fields().iter().all(|f| f.visibility == Visibility::Private));
        let methods: Vec<_> = class.methods().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(methods, ["getId", "setId", "getName", "setName"]);
        assert!(class.tags().is_empty());
    }

    #[test]
    fn build_is_idempotent() {
        let app = shop();
        let mut model = ClassModel::new();
        let builder = ClassBuilder::new(&app);

        let first = builder.build_named(&mut model, "Order", Layer::Persistence).unwrap();
        let count = model.len();
        let second = builder.build_named(&mut model, "Order", Layer::Persistence).unwrap();

        assert_eq!(first, second);
        assert_eq!(model.len(), count);
        assert_eq!(model.get(first).fields().len(), 3);
    }

    #[test]
    fn persistence_relations_are_tagged() {
        let app = shop();
        let mut model = ClassModel::new();
        let order = ClassBuilder::new(&app)
            .build_named(&mut model, "Order", Layer::Persistence)
            .unwrap();

        let class = model.get(order);
        assert!(class.has_tag(&Tag::PersistentEntity));
        assert!(class.has_tag(&Tag::Table {
            name: "Order".into()
        }));
        assert!(class.field("id").unwrap().tags.is_empty());
        assert_eq!(class.field("item").unwrap().tags, vec![Tag::OneToOne]);
        assert_eq!(class.field("lines").unwrap().tags, vec![Tag::OneToMany]);
    }

    #[test]
    fn referenced_classes_are_built_in_same_layer() {
        let app = shop();
        let mut model = ClassModel::new();
        let order = ClassBuilder::new(&app)
            .build_named(&mut model, "Order", Layer::Transport)
            .unwrap();

        let product = model.domain_class("Product", Layer::Transport).unwrap();
        assert!(model.get(product).is_built());
        assert_eq!(
            model.get(order).field("item").unwrap().ty,
            FieldType::Generated {
                class: product,
                layer: Layer::Transport
            }
        );
        assert!(model.get(order).field("item").unwrap().tags.is_empty());
        assert!(model.validate_complete().is_ok());
    }

    #[test]
    fn self_reference_points_at_class_being_built() {
        let app = shop();
        let mut model = ClassModel::new();
        let category = ClassBuilder::new(&app)
            .build_named(&mut model, "Category", Layer::Persistence)
            .unwrap();

        assert_eq!(
            model.get(category).field("parent").unwrap().ty.generated_class(),
            Some(category)
        );
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn unknown_entity_name_fails() {
        let app = shop();
        let err = ClassBuilder::new(&app)
            .build_named(&mut ClassModel::new(), "Invoice", Layer::Business)
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::UnresolvedEntity {
                name: "Invoice".into()
            }
        );
    }
}
