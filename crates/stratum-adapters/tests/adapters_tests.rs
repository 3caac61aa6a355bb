//! End-to-end tests: model files in, Java sources out.

use std::{fs, path::Path};

use stratum_adapters::{
    FileModelStore, InMemoryModelStore, LocalFilesystem, MemoryFilesystem, SourceEmitter,
    emitter::render_class,
};
use stratum_core::prelude::*;
use tempfile::TempDir;

const SHOP: &str = r#"
base_package = "app."
standard_types = true

[[entities]]
name = "Order"
attributes = [
  { name = "id", type = "Long" },
  { name = "item", type = "Product" },
]

[[entities]]
name = "Product"
attributes = [
  { name = "id", type = "Long" },
  { name = "name", type = "String" },
]
"#;

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

fn memory_service(fs: &MemoryFilesystem) -> GenerationService {
    let store = InMemoryModelStore::with_apps([shop()]).unwrap();
    GenerationService::new(Box::new(store), Box::new(SourceEmitter::new(fs.clone(), "out")))
}

fn read(fs: &MemoryFilesystem, path: &str) -> String {
    fs.read_file(Path::new(path))
        .unwrap_or_else(|| panic!("{path} was not written"))
}

#[test]
fn file_store_to_disk() {
    let models = TempDir::new().unwrap();
    fs::write(models.path().join("Shop.toml"), SHOP).unwrap();
    let out = TempDir::new().unwrap();

    let service = GenerationService::new(
        Box::new(FileModelStore::new(models.path())),
        Box::new(SourceEmitter::new(LocalFilesystem::new(), out.path())),
    );
    let outcome = service.generate("Shop").unwrap();

    assert_eq!(outcome.report.file_count(), outcome.model.class_count());
    assert!(out.path().join("app/model/Order.java").is_file());
    assert!(out.path().join("app/dto/Product.java").is_file());
    assert!(out.path().join("app/dao/ShopDAOService.java").is_file());
    assert!(out.path().join("app/config/ShopConfig.java").is_file());
}

#[test]
fn persistent_entity_is_annotated() {
    let fs = MemoryFilesystem::new();
    memory_service(&fs).generate("Shop").unwrap();

    let order = read(&fs, "out/app/model/Order.java");
    assert!(order.starts_with("package app.model;\n"));
    assert!(order.contains("@javax.persistence.Entity\n"));
    assert!(order.contains("@javax.persistence.Table(name = \"Order\")"));
    assert!(order.contains("    @javax.persistence.OneToOne\n    private app.model.Product item;"));
    assert!(order.contains("public app.model.Product getItem() {\n        return this.item;"));
    assert!(
        order.contains("public void setItem(app.model.Product item) {\n        this.item = item;")
    );

    let dto = read(&fs, "out/app/dto/Order.java");
    assert!(dto.contains("@javax.xml.bind.annotation.XmlRootElement"));
    assert!(!dto.contains("OneToOne"));
}

#[test]
fn facades_delegate_down_the_stack() {
    let fs = MemoryFilesystem::new();
    memory_service(&fs).generate("Shop").unwrap();

    let dao = read(&fs, "out/app/dao/ShopDAOService.java");
    assert!(dao.contains("@org.springframework.stereotype.Component"));
    assert!(
        dao.contains("@javax.persistence.PersistenceContext\n    private javax.persistence.EntityManager entityManager;")
    );
    assert!(dao.contains("this.entityManager.persist(order);\n        return order;"));
    assert!(dao.contains("return this.entityManager.find(app.model.Order.class, id);"));
    assert!(dao.contains("\"select e from Product e\", app.model.Product.class"));

    let biz = read(&fs, "out/app/biz/ShopBizService.java");
    assert!(
        biz.contains("@org.springframework.beans.factory.annotation.Autowired\n    private app.dao.ShopDAOService shopDAOService;")
    );
    assert!(biz.contains("public app.bo.Order createOrder(app.bo.Order order) {"));

    let svc = read(&fs, "out/app/service/ShopService.java");
    assert!(svc.contains("private app.biz.ShopBizService shopBizService;"));
    assert!(svc.contains("this.shopBizService.deleteOrder(id);"));
}

#[test]
fn config_class_declares_one_bean_per_facade() {
    let fs = MemoryFilesystem::new();
    memory_service(&fs).generate("Shop").unwrap();

    let config = read(&fs, "out/app/config/ShopConfig.java");
    assert!(
        config.contains("@org.springframework.context.annotation.Configuration\npublic class ShopConfig {")
    );
    assert_eq!(config.matches("@org.springframework.context.annotation.Bean(").count(), 3);
    assert!(config.contains("return new app.service.ShopService();"));
}

#[test]
fn config_class_can_be_left_out() {
    let fs = MemoryFilesystem::new();
    let service = memory_service(&fs)
        .with_options(GenerationOptions::default().with_emit_config_class(false));

    let outcome = service.generate("Shop").unwrap();

    assert_eq!(outcome.report.file_count(), outcome.model.class_count() - 1);
    assert!(fs.read_file(Path::new("out/app/config/ShopConfig.java")).is_none());
}

#[test]
fn rendered_header_names_the_run() {
    let fs = MemoryFilesystem::new();
    let service = memory_service(&fs);
    let model = service.generate_model(&shop()).unwrap();

    let source = render_class(&model, model.config_class()).unwrap();
    assert!(source.contains(&format!("(run {})", model.run_id)));
    assert!(source.contains("for app Shop"));
}
