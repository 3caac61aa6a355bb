use std::collections::BTreeMap;

use crate::domain::{
    error::{DomainError, DomainResult},
    generation::facade::FacadeHandle,
    value_objects::Layer,
};

/// Facades built so far in one generation run, by layer.
///
/// Each layer is written once, right after its facade is built, and read by
/// the layer above. A registry belongs to a single run; concurrent runs each
/// construct their own.
#[derive(Debug, Default)]
pub struct GenerationRegistry {
    facades: BTreeMap<Layer, FacadeHandle>,
}

impl GenerationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, layer: Layer, facade: FacadeHandle) -> DomainResult<()> {
        if facade.layer != layer {
            return Err(DomainError::InvalidWiring(format!(
                "cannot register a {} facade under the {layer} layer",
                facade.layer
            )));
        }
        if self.facades.contains_key(&layer) {
            return Err(DomainError::FacadeAlreadyRegistered { layer });
        }
        self.facades.insert(layer, facade);
        Ok(())
    }

    pub fn lookup(&self, layer: Layer) -> DomainResult<FacadeHandle> {
        self.get(layer)
            .ok_or(DomainError::FacadeNotRegistered { layer })
    }

    pub fn get(&self, layer: Layer) -> Option<FacadeHandle> {
        self.facades.get(&layer).copied()
    }

    pub fn contains(&self, layer: Layer) -> bool {
        self.facades.contains_key(&layer)
    }

    pub fn len(&self) -> usize {
        self.facades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facades.is_empty()
    }

    /// Entries in layer order.
    pub fn iter(&self) -> impl Iterator<Item = (Layer, FacadeHandle)> + '_ {
        self.facades.iter().map(|(l, f)| (*l, *f))
    }

    pub fn into_map(self) -> BTreeMap<Layer, FacadeHandle> {
        self.facades
    }
}
