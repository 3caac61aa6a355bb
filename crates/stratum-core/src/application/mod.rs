//! Application layer for Stratum.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService, GenerationRun)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Options**: Per-run generation settings
//! - **Errors**: Application-specific error types
//!
//! The application layer sequences the domain builders but contains no
//! generation logic itself. All generation rules live in `crate::domain`.

pub mod error;
pub mod model;
pub mod options;
pub mod ports;
pub mod services;

pub use services::{GenerationOutcome, GenerationRun, GenerationService};

pub use ports::{ConfigHook, DomainModelStore, EmitReport, Filesystem, ModelEmitter, NoopConfigHook};

pub use error::{ApplicationError, GenerationStep};
pub use model::GeneratedModel;
pub use options::{DEFAULT_ID_TYPE, FacadeConflictPolicy, GenerationOptions};
