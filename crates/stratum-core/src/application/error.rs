//! Application layer errors.
//!
//! These errors represent failures in orchestration and at the ports, not
//! in generation logic. Generation logic errors are `DomainError` from
//! `crate::domain`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::error::{ErrorCategory, StratumError};

/// Step of a generation run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GenerationStep {
    Validate,
    Beans,
    Config,
    PersistenceFacade,
    BusinessFacade,
    TransportFacade,
    PostConfig,
    Verify,
    Emit,
}

impl GenerationStep {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::Beans => "beans",
            Self::Config => "config",
            Self::PersistenceFacade => "persistence facade",
            Self::BusinessFacade => "business facade",
            Self::TransportFacade => "transport facade",
            Self::PostConfig => "post-config",
            Self::Verify => "verify",
            Self::Emit => "emit",
        }
    }
}

impl fmt::Display for GenerationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A generation run aborted; `source` is the root cause.
    #[error("Cannot generate app '{app}' ({step} step): {source}")]
    GenerationFailed {
        app: String,
        step: GenerationStep,
        #[source]
        source: Box<StratumError>,
    },

    /// No domain model with this name in the store.
    #[error("Domain model not found: {name}")]
    ModelNotFound { name: String },

    /// The domain model store could not be read.
    #[error("Domain model store error: {reason}")]
    StoreAccess { reason: String },

    /// The emission pipeline rejected or failed to write the model.
    #[error("Emission failed: {reason}")]
    EmissionFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The post-configuration hook failed.
    #[error("Post-configuration hook failed: {reason}")]
    ConfigHookFailed { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::GenerationFailed { source, .. } => source.suggestions(),
            Self::ModelNotFound { name } => vec![
                format!("No model named '{name}' in the models directory"),
                "Try: stratum inspect --models <DIR> to list available models".into(),
                "Model files are <name>.toml or <name>.json".into(),
            ],
            Self::StoreAccess { reason } => vec![
                format!("Store error: {reason}"),
                "Check that the models directory exists and is readable".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::EmissionFailed { .. } => vec![
                "Some files may already have been written".into(),
                "Re-run with --force to overwrite the output directory".into(),
            ],
            Self::ConfigHookFailed { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::GenerationFailed { source, .. } => source.category(),
            Self::ModelNotFound { .. } => ErrorCategory::NotFound,
            Self::StoreAccess { .. } => ErrorCategory::Configuration,
            Self::FilesystemError { .. }
            | Self::EmissionFailed { .. }
            | Self::ConfigHookFailed { .. } => ErrorCategory::Internal,
        }
    }
}
