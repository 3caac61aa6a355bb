use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{ClassDefinition, ClassId, ClassKind, ClassModel, FacadeHandle, Layer};

/// Output of a completed generation run.
///
/// Only produced once every layer is built and the model has been verified,
/// so emitters can rely on it being complete.
#[derive(Debug, Clone)]
pub struct GeneratedModel {
    pub app_name: String,
    pub base_package: Option<String>,
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub model: ClassModel,
    pub facades: BTreeMap<Layer, FacadeHandle>,
    pub config: ClassId,
    pub emit_config_class: bool,
}

impl GeneratedModel {
    pub fn facade(&self, layer: Layer) -> Option<&ClassDefinition> {
        self.facades.get(&layer).map(|h| self.model.get(h.class))
    }

    pub fn config_class(&self) -> &ClassDefinition {
        self.model.get(self.config)
    }

    /// Classes the emitter should write, in build order.
    pub fn emittable(&self) -> impl Iterator<Item = &ClassDefinition> {
        self.model
            .iter()
            .filter(|c| self.emit_config_class || *c.kind() != ClassKind::Configuration)
    }

    pub fn class_count(&self) -> usize {
        self.model.len()
    }

    pub fn method_count(&self) -> usize {
        self.model.iter().map(|c| c.methods().len()).sum()
    }
}
