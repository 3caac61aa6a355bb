//! Layer facades.
//!
//! A facade is the aggregate entry point of a layer: no domain fields, one
//! CRUD group per class it serves, and an injected reference to the facade
//! of the layer directly below.

use tracing::debug;

use crate::domain::{
    entities::{
        app::App,
        class_def::{ClassId, ClassKind, Delegation, FieldDef, FieldType, Tag},
        class_model::ClassModel,
    },
    error::{DomainError, DomainResult},
    generation::crud,
    naming,
    policy::{PERSISTENCE_CONTEXT_FIELD, PERSISTENCE_CONTEXT_TYPE},
    value_objects::Layer,
};

/// A built facade and the layer it serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FacadeHandle {
    pub layer: Layer,
    pub class: ClassId,
}

/// Build the facade of `layer` over `classes`.
///
/// `dependency` must be the facade of `layer.below()`, and must be absent
/// for the lowest layer. Every facade delegation is checked against the
/// methods the dependency actually exposes.
pub fn build_facade(
    model: &mut ClassModel,
    app: &App,
    layer: Layer,
    classes: &[ClassId],
    dependency: Option<FacadeHandle>,
    default_id_type: &str,
) -> DomainResult<FacadeHandle> {
    check_dependency(layer, dependency)?;

    let policy = layer.policy();
    let package = policy.facade_package(app.base_namespace().unwrap_or(""));
    let name = policy.facade_name(&app.name);

    let class = match model.define(ClassKind::Facade, layer, &package, &name) {
        Ok(id) => id,
        Err(DomainError::DuplicateClass { existing, .. }) if model.get(existing).is_facade() => {
            // A facade left unbuilt by an earlier failure is never reused.
            if !model.get(existing).is_built() {
                return Err(DomainError::InvalidWiring(format!(
                    "the {layer} facade {} failed to build earlier in this run",
                    model.get(existing).qualified_name()
                )));
            }
            return Err(DomainError::DuplicateFacade {
                layer,
                existing: FacadeHandle {
                    layer,
                    class: existing,
                },
            });
        }
        Err(e) => return Err(e),
    };

    {
        let def = model.get_mut(class);
        for tag in policy.facade_tags() {
            def.add_tag(tag);
        }
    }

    if let Some(dep) = dependency {
        let field_name = naming::lower_first(model.get(dep.class).name());
        let field = FieldDef::private(
            field_name,
            FieldType::Generated {
                class: dep.class,
                layer: dep.layer,
            },
        )
        .with_tag(Tag::Injected);
        model.get_mut(class).add_field(field);
    }

    if policy.holds_persistence_context() {
        let field = FieldDef::private(
            PERSISTENCE_CONTEXT_FIELD,
            FieldType::opaque(PERSISTENCE_CONTEXT_TYPE),
        )
        .with_tag(Tag::PersistenceContext);
        model.get_mut(class).add_field(field);
    }

    for &subject in classes {
        crud::append_crud(model, class, subject, default_id_type)?;
    }

    if let Some(dep) = dependency {
        verify_delegations(model, class, dep)?;
    }

    let def = model.get_mut(class);
    def.mark_built();
    debug!(
        facade = %def.qualified_name(),
        %layer,
        methods = def.methods().len(),
        "built facade"
    );

    Ok(FacadeHandle { layer, class })
}

fn check_dependency(layer: Layer, dependency: Option<FacadeHandle>) -> DomainResult<()> {
    match (layer.below(), dependency) {
        (None, None) => Ok(()),
        (Some(expected), Some(dep)) if dep.layer == expected => Ok(()),
        (Some(expected), None) => Err(DomainError::FacadeNotRegistered { layer: expected }),
        (expected, Some(dep)) => Err(DomainError::InvalidWiring(format!(
            "the {layer} facade cannot depend on the {} facade (expected {})",
            dep.layer,
            expected.map_or("none", |l| l.as_str())
        ))),
    }
}

fn verify_delegations(
    model: &ClassModel,
    facade: ClassId,
    dependency: FacadeHandle,
) -> DomainResult<()> {
    let dep = model.get(dependency.class);
    for method in model.get(facade).methods() {
        if let Delegation::Facade { layer, method: target } = &method.delegation {
            if *layer != dependency.layer || dep.method(target).is_none() {
                return Err(DomainError::UnresolvedDelegation {
                    layer: model.get(facade).layer(),
                    method: method.name.clone(),
                    target: target.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{entities::app::Entity, generation::class_builder::ClassBuilder};

    const LONG: &str = "java.lang.Long";

    fn shop() -> App {
        App::new("Shop")
            .with_base_package("app.")
            .with_standard_types()
            .with_entity(
                Entity::new("Order")
                    .with_attribute("id", "Long")
                    .with_attribute("item", "Product"),
            )
            .with_entity(Entity::new("Product").with_attribute("id", "Long"))
    }

    fn layer_classes(
        model: &mut ClassModel,
        app: &App,
        layer: Layer,
        names: &[&str],
    ) -> Vec<ClassId> {
        let builder = ClassBuilder::new(app);
        names
            .iter()
            .map(|n| builder.build_named(model, n, layer).unwrap())
            .collect()
    }

    #[test]
    fn persistence_facade_has_no_dependency() {
        let app = shop();
        let mut model = ClassModel::new();
        let classes = layer_classes(&mut model, &app, Layer::Persistence, &["Order", "Product"]);

        let dao = build_facade(&mut model, &app, Layer::Persistence, &classes, None, LONG).unwrap();
        let def = model.get(dao.class);

        assert_eq!(def.qualified_name(), "app.dao.ShopDAOService");
        assert!(def.dependency_field().is_none());
        assert!(def.field(PERSISTENCE_CONTEXT_FIELD).unwrap().has_tag(&Tag::PersistenceContext));
        assert!(def.has_tag(&Tag::Component { singleton: true }));
        assert_eq!(def.methods().len(), 10);
        assert!(def.is_built());
    }

    #[test]
    fn dependency_field_points_one_layer_down() {
        let app = shop();
        let mut model = ClassModel::new();
        let dao_classes =
            layer_classes(&mut model, &app, Layer::Persistence, &["Order", "Product"]);
        let dao =
            build_facade(&mut model, &app, Layer::Persistence, &dao_classes, None, LONG).unwrap();
        let bo_classes = layer_classes(&mut model, &app, Layer::Business, &["Order"]);

        let biz = build_facade(&mut model, &app, Layer::Business, &bo_classes, Some(dao), LONG)
            .unwrap();
        let def = model.get(biz.class);

        let dep = def.dependency_field().unwrap();
        assert_eq!(dep.name, "shopDAOService");
        assert_eq!(def.dependency(), Some(dao.class));
        assert_eq!(def.methods().len(), 5);
    }

    #[test]
    fn missing_dependency_is_unregistered_lower_facade() {
        let app = shop();
        let mut model = ClassModel::new();
        let err = build_facade(&mut model, &app, Layer::Business, &[], None, LONG).unwrap_err();
        assert_eq!(
            err,
            DomainError::FacadeNotRegistered {
                layer: Layer::Persistence
            }
        );
    }

    #[test]
    fn skipping_a_layer_is_invalid_wiring() {
        let app = shop();
        let mut model = ClassModel::new();
        let dao = build_facade(&mut model, &app, Layer::Persistence, &[], None, LONG).unwrap();
        let err =
            build_facade(&mut model, &app, Layer::Transport, &[], Some(dao), LONG).unwrap_err();
        assert!(matches!(err, DomainError::InvalidWiring(_)));
    }

    #[test]
    fn second_facade_for_layer_is_duplicate() {
        let app = shop();
        let mut model = ClassModel::new();
        let dao = build_facade(&mut model, &app, Layer::Persistence, &[], None, LONG).unwrap();
        let err = build_facade(&mut model, &app, Layer::Persistence, &[], None, LONG).unwrap_err();
        assert_eq!(
            err,
            DomainError::DuplicateFacade {
                layer: Layer::Persistence,
                existing: dao
            }
        );
    }

    #[test]
    fn delegation_to_missing_operation_fails() {
        let app = shop();
        let mut model = ClassModel::new();
        let dao_classes = layer_classes(&mut model, &app, Layer::Persistence, &["Order"]);
        let dao =
            build_facade(&mut model, &app, Layer::Persistence, &dao_classes, None, LONG).unwrap();
        let bo_classes = layer_classes(&mut model, &app, Layer::Business, &["Order"]);
        let biz = build_facade(&mut model, &app, Layer::Business, &bo_classes, Some(dao), LONG)
            .unwrap();

        // Product has no business operations to delegate to.
        let dto_classes = layer_classes(&mut model, &app, Layer::Transport, &["Order", "Product"]);
        let err = build_facade(
            &mut model,
            &app,
            Layer::Transport,
            &dto_classes,
            Some(biz),
            LONG,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DomainError::UnresolvedDelegation { ref target, .. } if target == "createProduct"
        ));
    }

    #[test]
    fn facade_left_unbuilt_is_not_offered_for_reuse() {
        let app = shop();
        let mut model = ClassModel::new();
        let dao_classes = layer_classes(&mut model, &app, Layer::Persistence, &["Order"]);
        let dao =
            build_facade(&mut model, &app, Layer::Persistence, &dao_classes, None, LONG).unwrap();
        let bo_classes = layer_classes(&mut model, &app, Layer::Business, &["Order"]);
        let biz = build_facade(&mut model, &app, Layer::Business, &bo_classes, Some(dao), LONG)
            .unwrap();
        let dto_classes = layer_classes(&mut model, &app, Layer::Transport, &["Order", "Product"]);

        for _ in 0..2 {
            let err = build_facade(
                &mut model,
                &app,
                Layer::Transport,
                &dto_classes,
                Some(biz),
                LONG,
            )
            .unwrap_err();
            assert!(!matches!(err, DomainError::DuplicateFacade { .. }), "{err:?}");
        }
        assert!(model.validate_complete().is_err());
    }
}
