//! One generation run, step by step.
//!
//! `GenerationRun` owns the class arena and the registry of a single run
//! and exposes each build step separately. `GenerationService` drives the
//! steps in order; tests and embedders can drive them directly.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    application::{
        model::GeneratedModel,
        options::{FacadeConflictPolicy, GenerationOptions},
        ports::ConfigHook,
    },
    domain::{
        App, ClassBuilder, ClassId, ClassModel, DomainError, DomainResult, FacadeHandle,
        GenerationRegistry, Layer, build_facade, generation::config,
    },
    error::StratumResult,
};

/// Layers whose classes are built for every entity before any facade.
const BEAN_LAYERS: [Layer; 2] = [Layer::Persistence, Layer::Transport];

pub struct GenerationRun<'a> {
    app: &'a App,
    options: &'a GenerationOptions,
    run_id: Uuid,
    model: ClassModel,
    registry: GenerationRegistry,
    config: Option<ClassId>,
    post_configured: bool,
}

impl<'a> GenerationRun<'a> {
    pub fn new(app: &'a App, options: &'a GenerationOptions) -> Self {
        Self {
            app,
            options,
            run_id: Uuid::new_v4(),
            model: ClassModel::new(),
            registry: GenerationRegistry::new(),
            config: None,
            post_configured: false,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn model(&self) -> &ClassModel {
        &self.model
    }

    pub fn registry(&self) -> &GenerationRegistry {
        &self.registry
    }

    /// Build the persistence and transport classes of every entity, in
    /// model order.
    pub fn build_beans(&mut self) -> DomainResult<()> {
        let builder = ClassBuilder::new(self.app);
        for entity in &self.app.entities {
            for layer in BEAN_LAYERS {
                builder.build(&mut self.model, entity, layer)?;
            }
        }
        debug!(classes = self.model.len(), "built entity classes");
        Ok(())
    }

    /// Create the configuration class. Calling it again returns the same class.
    pub fn build_config(&mut self) -> DomainResult<ClassId> {
        if let Some(config) = self.config {
            return Ok(config);
        }
        let config = config::build_config(&mut self.model, self.app)?;
        self.config = Some(config);
        Ok(config)
    }

    /// Build, register, and add a bean for the facade of `layer`.
    ///
    /// The facade of the layer below must already be registered. A second
    /// request for the same layer is settled by the facade conflict policy.
    pub fn build_facade(&mut self, layer: Layer) -> DomainResult<FacadeHandle> {
        let config = self.config.ok_or_else(|| {
            DomainError::InvalidWiring("configuration class must be built before facades".into())
        })?;

        match self.try_build_facade(layer) {
            Ok(handle) => {
                self.registry.register(layer, handle)?;
                config::add_bean(&mut self.model, config, handle.class)?;
                info!(
                    %layer,
                    facade = %self.model.get(handle.class).qualified_name(),
                    "facade registered"
                );
                Ok(handle)
            }
            Err(DomainError::DuplicateFacade { existing, .. })
                if self.options.facade_conflict == FacadeConflictPolicy::Reuse =>
            {
                warn!(%layer, "facade already built in this run, reusing it");
                Ok(existing)
            }
            Err(e) => Err(e),
        }
    }

    fn try_build_facade(&mut self, layer: Layer) -> DomainResult<FacadeHandle> {
        if let Some(existing) = self.registry.get(layer) {
            return Err(DomainError::DuplicateFacade { layer, existing });
        }

        let dependency = layer
            .below()
            .map(|below| self.registry.lookup(below))
            .transpose()?;
        let classes = self.facade_classes(layer)?;

        build_facade(
            &mut self.model,
            self.app,
            layer,
            &classes,
            dependency,
            &self.options.default_id_type,
        )
    }

    /// Classes a layer's facade serves.
    ///
    /// Business classes are built here for the selected entities; the other
    /// layers serve every entity. Each class appears once, in first-seen
    /// order, however often its entity is selected.
    fn facade_classes(&mut self, layer: Layer) -> DomainResult<Vec<ClassId>> {
        let (app, options) = (self.app, self.options);
        let builder = ClassBuilder::new(app);
        let model = &mut self.model;
        let classes: Vec<ClassId> = match (layer, &options.business_entities) {
            (Layer::Business, Some(selected)) => selected
                .iter()
                .map(|name| builder.build_named(model, name, layer))
                .collect::<DomainResult<_>>()?,
            _ => app
                .entities
                .iter()
                .map(|entity| builder.build(model, entity, layer))
                .collect::<DomainResult<_>>()?,
        };

        let mut seen = HashSet::new();
        Ok(classes.into_iter().filter(|id| seen.insert(*id)).collect())
    }

    /// Run the post-configuration hook on the configuration class.
    ///
    /// Requires the transport facade; runs at most once.
    pub fn run_post_config(&mut self, hook: &dyn ConfigHook) -> StratumResult<()> {
        self.registry.lookup(Layer::Transport)?;
        if self.post_configured {
            return Err(DomainError::InvalidWiring("post-configuration already ran".into()).into());
        }
        let config = self.config.ok_or_else(|| {
            DomainError::InvalidWiring("configuration class was never built".into())
        })?;

        let class = self.model.class_mut(config).ok_or_else(|| {
            DomainError::InvalidWiring(format!("configuration class {config} is not in the model"))
        })?;
        hook.post_config(class)?;
        self.post_configured = true;
        Ok(())
    }

    /// Verify the model and hand it over.
    pub fn finish(self) -> DomainResult<GeneratedModel> {
        for layer in Layer::ALL {
            self.registry.lookup(layer)?;
        }
        let config = self.config.ok_or_else(|| {
            DomainError::InvalidWiring("configuration class was never built".into())
        })?;
        self.model.validate_complete()?;

        Ok(GeneratedModel {
            app_name: self.app.name.clone(),
            base_package: self.app.base_namespace().map(str::to_string),
            run_id: self.run_id,
            generated_at: Utc::now(),
            model: self.model,
            facades: self.registry.into_map(),
            config,
            emit_config_class: self.options.emit_config_class,
        })
    }
}
