//! Implementation of the `stratum inspect` command.

use serde::Serialize;
use tracing::instrument;

use stratum_adapters::{FileModelStore, MemoryFilesystem, SourceEmitter, emitter::annotation};
use stratum_core::{
    application::{GeneratedModel, GenerationService},
    domain::{ClassDefinition, ClassKind, Layer},
};

use crate::{
    cli::{InspectArgs, InspectFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(app = ?args.app))]
pub fn execute(args: InspectArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let models_dir = args.models.clone().unwrap_or_else(|| config.models.dir.clone());
    // Nothing is emitted; the emitter only satisfies the service.
    let service = GenerationService::new(
        Box::new(FileModelStore::new(&models_dir)),
        Box::new(SourceEmitter::new(MemoryFilesystem::new(), "")),
    )
    .with_options(config.generation);

    let json = args.format == InspectFormat::Json || output.is_json();

    let Some(name) = args.app else {
        let apps = service.list_apps()?;
        if json {
            output.json(&apps)?;
        } else {
            output.header(&format!("Models in {}:", models_dir.display()))?;
            for app in &apps {
                output.print(&format!("  {app}"))?;
            }
        }
        return Ok(());
    };

    let app = service.load(&name)?;
    let model = service.generate_model(&app)?;
    let report = ModelReport::new(&model);

    if json {
        output.json(&report)?;
    } else {
        print_table(&report, &output)?;
    }
    Ok(())
}

fn print_table(report: &ModelReport, out: &OutputManager) -> CliResult<()> {
    out.header(&format!("{} (run {})", report.app, report.run_id))?;
    for layer in &report.layers {
        out.print("")?;
        out.header(&format!("{} layer", layer.layer))?;
        for class in &layer.classes {
            out.print(&format!("  {} [{}]", class.name, class.kind))?;
            for field in &class.fields {
                out.print(&format!("      {}: {}", field.name, field.ty))?;
            }
            out.print(&format!("      {} methods", class.methods.len()))?;
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct ModelReport {
    app: String,
    run_id: String,
    layers: Vec<LayerReport>,
}

#[derive(Debug, Serialize)]
struct LayerReport {
    layer: &'static str,
    classes: Vec<ClassReport>,
}

#[derive(Debug, Serialize)]
struct ClassReport {
    name: String,
    kind: &'static str,
    annotations: Vec<String>,
    fields: Vec<FieldReport>,
    methods: Vec<String>,
}

#[derive(Debug, Serialize)]
struct FieldReport {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    annotations: Vec<String>,
}

impl ModelReport {
    fn new(generated: &GeneratedModel) -> Self {
        let layers = Layer::ALL
            .iter()
            .map(|&layer| LayerReport {
                layer: layer.as_str(),
                classes: generated
                    .model
                    .classes_in(layer)
                    .map(|class| ClassReport::new(generated, class))
                    .collect(),
            })
            .collect();

        Self {
            app: generated.app_name.clone(),
            run_id: generated.run_id.to_string(),
            layers,
        }
    }
}

impl ClassReport {
    fn new(generated: &GeneratedModel, class: &ClassDefinition) -> Self {
        let kind = match class.kind() {
            ClassKind::Domain { .. } => "entity",
            ClassKind::Facade => "facade",
            ClassKind::Configuration => "configuration",
        };
        Self {
            name: class.qualified_name(),
            kind,
            annotations: class.tags().iter().map(annotation).collect(),
            fields: class
                .fields()
                .iter()
                .map(|field| FieldReport {
                    name: field.name.clone(),
                    ty: generated.model.render_type(&field.ty),
                    annotations: field.tags.iter().map(annotation).collect(),
                })
                .collect(),
            methods: class.methods().iter().map(|m| m.name.clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use stratum_adapters::InMemoryModelStore;
    use stratum_core::domain::{App, Entity};

    use super::*;

    fn shop_model() -> GeneratedModel {
        let app = App::new("Shop")
            .with_base_package("app.")
            .with_standard_types()
            .with_entity(
                Entity::new("Order")
                    .with_attribute("id", "Long")
                    .with_attribute("item", "Product"),
            )
            .with_entity(Entity::new("Product").with_attribute("id", "Long"));
        GenerationService::new(
            Box::new(InMemoryModelStore::new()),
            Box::new(SourceEmitter::new(MemoryFilesystem::new(), "")),
        )
        .generate_model(&app)
        .unwrap()
    }

    #[test]
    fn report_groups_classes_by_layer() {
        let report = ModelReport::new(&shop_model());

        let layers: Vec<_> = report.layers.iter().map(|l| l.layer).collect();
        assert_eq!(layers, Layer::ALL.map(|l| l.as_str()));

        let persistence = &report.layers[0];
        let order = persistence
            .classes
            .iter()
            .find(|c| c.name == "app.model.Order")
            .unwrap();
        assert_eq!(order.kind, "entity");
        let item = order.fields.iter().find(|f| f.name == "item").unwrap();
        assert_eq!(item.ty, "app.model.Product");
        assert_eq!(item.annotations, ["@javax.persistence.OneToOne"]);
    }

    #[test]
    fn report_serialises_field_type_key() {
        let json = serde_json::to_value(ModelReport::new(&shop_model())).unwrap();
        let first_field = &json["layers"][0]["classes"][0]["fields"][0];
        assert!(first_field.get("type").is_some());
    }
}
