//! Integration tests for stratum-core: full runs over the public API.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use stratum_core::{
    application::{ApplicationError, GenerationRun, GenerationStep},
    domain::{DomainError, MethodKind},
    error::StratumResult,
    prelude::*,
};

fn shop() -> App {
    App::new("Shop")
        .with_base_package("app.")
        .with_standard_types()
        .with_entity(
            Entity::new("Order")
                .with_attribute("id", "Long")
                .with_attribute("item", "Product"),
        )
        .with_entity(
            Entity::new("Product")
                .with_attribute("id", "Long")
                .with_attribute("name", "String"),
        )
}

struct FixedStore(App);

impl DomainModelStore for FixedStore {
    fn load_app(&self, name: &str) -> StratumResult<App> {
        if name == self.0.name {
            Ok(self.0.clone())
        } else {
            Err(ApplicationError::ModelNotFound { name: name.into() }.into())
        }
    }

    fn list_apps(&self) -> StratumResult<Vec<String>> {
        Ok(vec![self.0.name.clone()])
    }
}

#[derive(Clone, Default)]
struct CountingEmitter(Arc<AtomicUsize>);

impl ModelEmitter for CountingEmitter {
    fn emit(&self, model: &GeneratedModel) -> StratumResult<EmitReport> {
        self.0.fetch_add(1, Ordering::SeqCst);
        let mut report = EmitReport::new("out");
        report.files = model
            .emittable()
            .map(|c| format!("{}.java", c.qualified_name()).into())
            .collect();
        Ok(report)
    }
}

#[derive(Clone, Default)]
struct CountingHook(Arc<AtomicUsize>);

impl ConfigHook for CountingHook {
    fn post_config(&self, _config: &mut ClassDefinition) -> StratumResult<()> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn service_for(app: App) -> (GenerationService, CountingEmitter) {
    let emitter = CountingEmitter::default();
    let service = GenerationService::new(Box::new(FixedStore(app)), Box::new(emitter.clone()));
    (service, emitter)
}

fn class<'m>(model: &'m GeneratedModel, qualified: &str) -> &'m ClassDefinition {
    let id = model
        .model
        .find(qualified)
        .unwrap_or_else(|| panic!("missing class {qualified}"));
    model.model.get(id)
}

#[test]
fn order_product_scenario() {
    let (service, emitter) = service_for(shop());
    let outcome = service.generate("Shop").unwrap();
    let model = &outcome.model;

    // Persistence: Order.item is a one-to-one to the generated Product.
    let dao_order = class(model, "app.model.Order");
    let dao_product = class(model, "app.model.Product");
    let item = dao_order.field("item").unwrap();
    assert_eq!(item.ty.generated_class(), Some(dao_product.id()));
    assert_eq!(item.tags, vec![Tag::OneToOne]);
    assert!(dao_order.has_tag(&Tag::PersistentEntity));

    // Transport: parallel classes without relation tags.
    let dto_order = class(model, "app.dto.Order");
    let dto_product = class(model, "app.dto.Product");
    assert_ne!(dto_order.id(), dao_order.id());
    let dto_item = dto_order.field("item").unwrap();
    assert_eq!(dto_item.ty.generated_class(), Some(dto_product.id()));
    assert!(dto_item.tags.is_empty());
    assert!(dto_order.has_tag(&Tag::SerializableRoot));

    // Three facades, chained downward.
    assert_eq!(model.facades.len(), 3);
    let dao = model.facade(Layer::Persistence).unwrap();
    let biz = model.facade(Layer::Business).unwrap();
    let svc = model.facade(Layer::Transport).unwrap();
    assert_eq!(dao.qualified_name(), "app.dao.ShopDAOService");
    assert_eq!(biz.qualified_name(), "app.biz.ShopBizService");
    assert_eq!(svc.qualified_name(), "app.service.ShopService");
    assert_eq!(dao.dependency(), None);
    assert_eq!(biz.dependency(), Some(dao.id()));
    assert_eq!(svc.dependency(), Some(biz.id()));

    assert_eq!(emitter.0.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.report.file_count(), model.class_count());
}

#[test]
fn unknown_type_fails_before_any_facade() {
    let app = shop().with_entity(Entity::new("Invoice").with_attribute("total", "Money"));
    let options = GenerationOptions::default();
    let mut run = GenerationRun::new(&app, &options);

    let err = run.build_beans().unwrap_err();
    assert!(err.is_resolution_failure());
    assert!(run.registry().is_empty());
    assert!(run.model().iter().all(|c| !c.is_facade()));

    let (service, emitter) = service_for(app);
    let err = service.generate("Shop").unwrap_err();
    assert!(matches!(
        err,
        StratumError::Application(ApplicationError::GenerationFailed {
            step: GenerationStep::Beans,
            ..
        })
    ));
    assert_eq!(emitter.0.load(Ordering::SeqCst), 0);
}

#[test]
fn second_business_facade_request_reuses_registered_one() {
    let app = shop();
    let options = GenerationOptions::default();
    let mut run = GenerationRun::new(&app, &options);
    run.build_beans().unwrap();
    run.build_config().unwrap();
    run.build_facade(Layer::Persistence).unwrap();

    let first = run.build_facade(Layer::Business).unwrap();
    let classes = run.model().len();
    let second = run.build_facade(Layer::Business).unwrap();

    assert_eq!(first, second);
    assert_eq!(run.model().len(), classes);
    assert_eq!(run.registry().len(), 2);
}

#[test]
fn second_facade_request_fails_under_fail_policy() {
    let app = shop();
    let options = GenerationOptions::default().with_facade_conflict(FacadeConflictPolicy::Fail);
    let mut run = GenerationRun::new(&app, &options);
    run.build_beans().unwrap();
    run.build_config().unwrap();
    let dao = run.build_facade(Layer::Persistence).unwrap();

    let err = run.build_facade(Layer::Persistence).unwrap_err();
    assert_eq!(
        err,
        DomainError::DuplicateFacade {
            layer: Layer::Persistence,
            existing: dao
        }
    );
}

#[test]
fn reversed_build_order_fails_lookup() {
    let app = shop();
    let options = GenerationOptions::default();
    let mut run = GenerationRun::new(&app, &options);
    run.build_beans().unwrap();
    run.build_config().unwrap();

    assert_eq!(
        run.build_facade(Layer::Transport).unwrap_err(),
        DomainError::FacadeNotRegistered {
            layer: Layer::Business
        }
    );
    assert_eq!(
        run.build_facade(Layer::Business).unwrap_err(),
        DomainError::FacadeNotRegistered {
            layer: Layer::Persistence
        }
    );
    assert!(run.registry().is_empty());
}

#[test]
fn every_field_reference_stays_in_its_layer() {
    let app = shop()
        .with_type("Products", "java.util.List<app.Product>")
        .with_entity(
            Entity::new("Catalog")
                .with_attribute("id", "Long")
                .with_attribute("products", "Products")
                .with_attribute("parent", "Catalog"),
        );
    let (service, _) = service_for(app);
    let model = service.generate_model(&service.load("Shop").unwrap()).unwrap();

    for def in model.model.iter().filter(|c| c.entity().is_some()) {
        for field in def.fields() {
            for (referenced, layer) in field.ty.referenced_classes() {
                assert_eq!(layer, def.layer());
                assert_eq!(model.model.get(referenced).layer(), def.layer());
            }
        }
    }

    // Collection arguments are the layer-local class, not the domain type.
    let catalog = class(&model, "app.dto.Catalog");
    let products = catalog.field("products").unwrap();
    let product = class(&model, "app.dto.Product");
    assert_eq!(products.ty.element_class(), Some(product.id()));
    assert_eq!(
        class(&model, "app.model.Catalog").field("products").unwrap().tags,
        vec![Tag::OneToMany]
    );

    // Self-reference resolves to the class being built.
    assert_eq!(catalog.field("parent").unwrap().ty.generated_class(), Some(catalog.id()));
}

#[test]
fn facades_carry_five_crud_methods_per_class_delegating_down() {
    let (service, _) = service_for(shop());
    let model = service.generate_model(&shop()).unwrap();

    for layer in Layer::ALL {
        let facade = model.facade(layer).unwrap();
        let crud: Vec<_> = facade
            .methods()
            .iter()
            .filter_map(|m| match &m.kind {
                MethodKind::Crud { op, entity } => Some((*op, entity.clone(), m)),
                _ => None,
            })
            .collect();
        assert_eq!(crud.len(), 10, "{layer} facade");

        for chunk in crud.chunks(5) {
            let ops: Vec<_> = chunk.iter().map(|(op, _, _)| *op).collect();
            assert_eq!(ops, CrudOp::ALL);
        }

        for (_, _, method) in &crud {
            match (layer.below(), &method.delegation) {
                (Some(below), Delegation::Facade { layer: target, method: name }) => {
                    assert_eq!(*target, below);
                    assert!(model.facade(below).unwrap().method(name).is_some());
                }
                (None, Delegation::PersistenceCollaborator { .. }) => {}
                (expected, other) => {
                    panic!("{} delegates to {other:?}, expected {expected:?}", method.name)
                }
            }
        }
    }
}

#[test]
fn config_has_one_bean_per_facade_and_hook_runs_once() {
    let hook = CountingHook::default();
    let (service, _) = service_for(shop());
    let service = service.with_hook(Box::new(hook.clone()));
    let model = service.generate_model(&shop()).unwrap();

    let config = model.config_class();
    assert_eq!(config.qualified_name(), "app.config.ShopConfig");
    let beans: Vec<_> = config.methods().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(beans, ["shopDAOService", "shopBizService", "shopService"]);
    assert_eq!(hook.0.load(Ordering::SeqCst), 1);
}

#[test]
fn explicit_business_selection_of_every_entity_builds_full_facade() {
    let app = shop();
    let options = GenerationOptions::default().with_business_entities(["Product", "Order"]);
    let (service, _) = service_for(app.clone());
    let model = service.with_options(options).generate_model(&app).unwrap();

    let biz = model.facade(Layer::Business).unwrap();
    assert_eq!(biz.methods().len(), 10);
    assert_eq!(biz.methods()[0].name, "createProduct");
    assert!(model.model.find("app.bo.Order").is_some());
}

#[test]
fn repeated_business_selection_yields_one_crud_group_per_entity() {
    let app = shop();
    let options =
        GenerationOptions::default().with_business_entities(["Order", "Product", "Order"]);
    let (service, _) = service_for(app.clone());
    let model = service.with_options(options).generate_model(&app).unwrap();

    let names: Vec<_> = model
        .facade(Layer::Business)
        .unwrap()
        .methods()
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(
        names,
        [
            "createOrder",
            "getOrder",
            "updateOrder",
            "deleteOrder",
            "listOrder",
            "createProduct",
            "getProduct",
            "updateProduct",
            "deleteProduct",
            "listProduct",
        ]
    );
    assert_eq!(model.facade(Layer::Transport).unwrap().methods().len(), 10);
}

#[test]
fn retrying_a_failed_facade_build_never_returns_it() {
    let app = shop();
    let options = GenerationOptions::default().with_business_entities(["Order"]);
    let mut run = GenerationRun::new(&app, &options);
    run.build_beans().unwrap();
    run.build_config().unwrap();
    run.build_facade(Layer::Persistence).unwrap();
    run.build_facade(Layer::Business).unwrap();

    let first = run.build_facade(Layer::Transport).unwrap_err();
    assert!(matches!(first, DomainError::UnresolvedDelegation { .. }));

    let retry = run.build_facade(Layer::Transport).unwrap_err();
    assert!(matches!(retry, DomainError::InvalidWiring(_)));
    assert!(!run.registry().contains(Layer::Transport));
    assert!(run.finish().is_err());
}

#[test]
fn partial_business_selection_leaves_transport_unresolved() {
    let app = shop();
    let options = GenerationOptions::default().with_business_entities(["Order"]);
    let (service, _) = service_for(app.clone());

    let err = service.with_options(options).generate_model(&app).unwrap_err();
    assert!(matches!(
        err.as_domain(),
        Some(DomainError::UnresolvedDelegation { layer: Layer::Transport, .. })
    ));
}

#[test]
fn runs_are_independent() {
    let (service, _) = service_for(shop());
    let a = service.generate_model(&shop()).unwrap();
    let b = service.generate_model(&shop()).unwrap();

    assert_ne!(a.run_id, b.run_id);
    assert_eq!(a.class_count(), b.class_count());
}
