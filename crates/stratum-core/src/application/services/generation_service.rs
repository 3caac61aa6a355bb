//! Generation Service - main application orchestrator.
//!
//! This service coordinates the whole generation workflow:
//! 1. Load the domain model
//! 2. Validate it
//! 3. Build entity classes and the configuration class
//! 4. Build the persistence, business, and transport facades in order
//! 5. Run the post-configuration hook
//! 6. Verify the model and hand it to the emitter
//!
//! Any failure from step 2 on aborts the run and is reported as a single
//! `ApplicationError::GenerationFailed` naming the step and the root cause.

use tracing::{Span, field, info, instrument};

use crate::{
    application::{
        ApplicationError, GenerationStep,
        model::GeneratedModel,
        options::GenerationOptions,
        ports::{ConfigHook, DomainModelStore, EmitReport, ModelEmitter, NoopConfigHook},
        services::generation_run::GenerationRun,
    },
    domain::{App, DomainValidator, Layer},
    error::{StratumError, StratumResult},
};

/// A generated and emitted model.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub model: GeneratedModel,
    pub report: EmitReport,
}

/// Main generation service.
pub struct GenerationService {
    store: Box<dyn DomainModelStore>,
    emitter: Box<dyn ModelEmitter>,
    hook: Box<dyn ConfigHook>,
    options: GenerationOptions,
}

impl GenerationService {
    /// Create a service with the default options and no post-configuration.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use stratum_core::application::{GenerationService, ports::*};
    ///
    /// let service = GenerationService::new(
    ///     store,   // impl DomainModelStore
    ///     emitter, // impl ModelEmitter
    /// );
    /// ```
    pub fn new(store: Box<dyn DomainModelStore>, emitter: Box<dyn ModelEmitter>) -> Self {
        Self {
            store,
            emitter,
            hook: Box::new(NoopConfigHook),
            options: GenerationOptions::default(),
        }
    }

    pub fn with_hook(mut self, hook: Box<dyn ConfigHook>) -> Self {
        self.hook = hook;
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Load a domain model from the store.
    pub fn load(&self, app_name: &str) -> StratumResult<App> {
        self.store.load_app(app_name)
    }

    /// Names of every model in the store.
    pub fn list_apps(&self) -> StratumResult<Vec<String>> {
        self.store.list_apps()
    }

    /// Load, generate, and emit the model named `app_name`.
    #[instrument(skip_all, fields(app = %app_name))]
    pub fn generate(&self, app_name: &str) -> StratumResult<GenerationOutcome> {
        let app = self.load(app_name)?;
        let model = self.generate_model(&app)?;
        let report = self.emit(&model)?;
        Ok(GenerationOutcome { model, report })
    }

    /// Hand a finished model to the emitter.
    pub fn emit(&self, model: &GeneratedModel) -> StratumResult<EmitReport> {
        let report = self
            .emitter
            .emit(model)
            .map_err(|e| failed(&model.app_name, GenerationStep::Emit, e))?;
        info!(
            files = report.file_count(),
            root = %report.root.display(),
            "model emitted"
        );
        Ok(report)
    }

    /// Build the complete class model for `app` without emitting it.
    #[instrument(skip_all, fields(app = %app.name, run_id = field::Empty))]
    pub fn generate_model(&self, app: &App) -> StratumResult<GeneratedModel> {
        DomainValidator::validate_app(app).map_err(failed_at(&app.name, GenerationStep::Validate))?;

        let mut run = GenerationRun::new(app, &self.options);
        Span::current().record("run_id", field::display(run.run_id()));
        info!(entities = app.entities.len(), "generating app");

        run.build_beans()
            .map_err(failed_at(&app.name, GenerationStep::Beans))?;
        run.build_config()
            .map_err(failed_at(&app.name, GenerationStep::Config))?;

        for layer in Layer::ALL {
            run.build_facade(layer)
                .map_err(failed_at(&app.name, facade_step(layer)))?;
        }

        run.run_post_config(self.hook.as_ref())
            .map_err(failed_at(&app.name, GenerationStep::PostConfig))?;

        let model = run
            .finish()
            .map_err(failed_at(&app.name, GenerationStep::Verify))?;
        info!(
            classes = model.class_count(),
            methods = model.method_count(),
            "class model complete"
        );
        Ok(model)
    }
}

fn facade_step(layer: Layer) -> GenerationStep {
    match layer {
        Layer::Persistence => GenerationStep::PersistenceFacade,
        Layer::Business => GenerationStep::BusinessFacade,
        Layer::Transport => GenerationStep::TransportFacade,
    }
}

fn failed_at<E: Into<StratumError>>(
    app: &str,
    step: GenerationStep,
) -> impl FnOnce(E) -> StratumError + '_ {
    move |e| failed(app, step, e.into())
}

fn failed(app: &str, step: GenerationStep, source: StratumError) -> StratumError {
    ApplicationError::GenerationFailed {
        app: app.to_string(),
        step,
        source: Box::new(source),
    }
    .into()
}
