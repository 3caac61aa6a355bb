// ============================================================================
// domain/error.rs - GENERATION ERROR DOMAIN
// ============================================================================

use thiserror::Error;

use crate::domain::entities::class_def::ClassId;
use crate::domain::generation::facade::FacadeHandle;
use crate::domain::value_objects::Layer;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they are carried inside the aggregate generation failure)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Resolution Errors (lookup by name failed)
    // ========================================================================
    #[error("unknown type '{type_name}' for attribute '{entity}.{attribute}'")]
    UnresolvedType {
        type_name: String,
        entity: String,
        attribute: String,
    },

    #[error("unknown entity '{name}'")]
    UnresolvedEntity { name: String },

    #[error("malformed type expression '{expression}': {reason}")]
    MalformedType { expression: String, reason: String },

    #[error("'{method}' on the {layer} facade delegates to missing operation '{target}'")]
    UnresolvedDelegation {
        layer: Layer,
        method: String,
        target: String,
    },

    // ========================================================================
    // Duplicate Definitions (recoverable: the caller decides)
    // ========================================================================
    #[error("class '{name}' already exists")]
    DuplicateClass { name: String, existing: ClassId },

    #[error("facade for the {layer} layer already exists")]
    DuplicateFacade { layer: Layer, existing: FacadeHandle },

    // ========================================================================
    // Wiring Errors (programming errors in the build order)
    // ========================================================================
    #[error("no facade registered for the {layer} layer")]
    FacadeNotRegistered { layer: Layer },

    #[error("facade for the {layer} layer is already registered")]
    FacadeAlreadyRegistered { layer: Layer },

    #[error("invalid wiring: {0}")]
    InvalidWiring(String),

    // ========================================================================
    // Model Validity
    // ========================================================================
    #[error("invalid domain model: {0}")]
    InvalidModel(String),

    #[error("class model incomplete: {} declared but never built", classes.join(", "))]
    IncompleteModel { classes: Vec<String> },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnresolvedType {
                type_name,
                entity,
                attribute,
            } => vec![
                format!("Attribute '{entity}.{attribute}' uses type '{type_name}'"),
                "Declare the type in the model's [[types]] catalog".into(),
                "Or name an entity declared in the same model".into(),
            ],
            Self::UnresolvedEntity { name } => vec![
                format!("No entity named '{name}' in the domain model"),
                "Check the spelling in --business or the model file".into(),
            ],
            Self::MalformedType { expression, .. } => vec![
                format!("Fix the class name '{expression}'"),
                "Parameterized types use the form Outer<Arg, ...>".into(),
            ],
            Self::UnresolvedDelegation { target, .. } => vec![
                format!("Operation '{target}' is not generated in the layer below"),
                "Include the entity in the business entity selection".into(),
            ],
            Self::DuplicateFacade { layer, .. } => vec![
                format!("The {layer} facade was requested twice in one run"),
                "Use the 'reuse' facade conflict policy to keep the first one".into(),
            ],
            Self::InvalidModel(msg) => vec![
                "Check the domain model file".into(),
                format!("Details: {msg}"),
            ],
            Self::FacadeNotRegistered { .. }
            | Self::FacadeAlreadyRegistered { .. }
            | Self::InvalidWiring(_)
            | Self::IncompleteModel { .. } => vec![
                "The layer build order was violated".into(),
                "This is a bug in the generator, please report it".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnresolvedType { .. }
            | Self::UnresolvedEntity { .. }
            | Self::UnresolvedDelegation { .. } => ErrorCategory::NotFound,
            Self::MalformedType { .. } | Self::InvalidModel(_) => ErrorCategory::Validation,
            Self::DuplicateClass { .. } | Self::DuplicateFacade { .. } => ErrorCategory::Conflict,
            Self::FacadeNotRegistered { .. }
            | Self::FacadeAlreadyRegistered { .. }
            | Self::InvalidWiring(_)
            | Self::IncompleteModel { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether this is a lookup failure (type, entity, or delegation target).
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            Self::UnresolvedType { .. }
                | Self::UnresolvedEntity { .. }
                | Self::MalformedType { .. }
                | Self::UnresolvedDelegation { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
    Internal,
}

/// Domain result alias.
pub type DomainResult<T> = Result<T, DomainError>;
