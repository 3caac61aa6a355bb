//! Infrastructure adapters for Stratum.
//!
//! This crate implements the ports defined in `stratum-core::application::ports`:
//! domain model stores, the Java source emitter, and filesystems. All I/O
//! lives here.

pub mod emitter;
pub mod filesystem;
pub mod model_store;

// Re-export commonly used adapters
pub use emitter::SourceEmitter;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use model_store::{FileModelStore, InMemoryModelStore, ModelManifest};
