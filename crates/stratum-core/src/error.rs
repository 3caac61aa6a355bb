//! Unified error handling for Stratum Core.
//!
//! Wraps domain and application errors behind one type, with categories for
//! display and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Stratum Core operations.
#[derive(Debug, Error, Clone)]
pub enum StratumError {
    /// Errors from the domain layer (resolution, wiring, model validity).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration, ports).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl StratumError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Stratum".into(),
                "Please report this issue at: https://github.com/cosecruz/stratum/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category().into(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The innermost error, looking through generation-failure wrappers.
    pub fn root_cause(&self) -> &StratumError {
        match self {
            Self::Application(ApplicationError::GenerationFailed { source, .. }) => {
                source.root_cause()
            }
            other => other,
        }
    }

    /// The domain error at the root of this failure, if any.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self.root_cause() {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
    Configuration,
    Internal,
}

impl From<crate::domain::ErrorCategory> for ErrorCategory {
    fn from(category: crate::domain::ErrorCategory) -> Self {
        match category {
            crate::domain::ErrorCategory::Validation => Self::Validation,
            crate::domain::ErrorCategory::NotFound => Self::NotFound,
            crate::domain::ErrorCategory::Conflict => Self::Conflict,
            crate::domain::ErrorCategory::Internal => Self::Internal,
        }
    }
}

/// Convenient result type alias.
pub type StratumResult<T> = Result<T, StratumError>;
