//! Domain model stores.

mod file;
mod manifest;
mod memory;

pub use file::FileModelStore;
pub use manifest::{ManifestError, ModelFormat, ModelManifest};
pub use memory::InMemoryModelStore;
