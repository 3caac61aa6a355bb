//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the generation engine needs from the outside:
//! a source of domain models, a sink for finished class models, and a hook
//! for final adjustments. The `stratum-adapters` crate provides
//! implementations.

use std::path::{Path, PathBuf};

use crate::application::model::GeneratedModel;
use crate::domain::{App, ClassDefinition};
use crate::error::StratumResult;

/// Port for loading domain models by name.
///
/// Implemented by:
/// - `stratum_adapters::model_store::InMemoryModelStore` (tests, embedding)
/// - `stratum_adapters::model_store::FileModelStore` (TOML/JSON files)
#[cfg_attr(test, mockall::automock)]
pub trait DomainModelStore: Send + Sync {
    /// Load the model named `name`.
    ///
    /// Unknown names fail with `ApplicationError::ModelNotFound`.
    fn load_app(&self, name: &str) -> StratumResult<App>;

    /// Names of every model in the store, sorted.
    fn list_apps(&self) -> StratumResult<Vec<String>>;
}

/// Port for the emission pipeline.
///
/// Receives only complete, verified models.
#[cfg_attr(test, mockall::automock)]
pub trait ModelEmitter: Send + Sync {
    fn emit(&self, model: &GeneratedModel) -> StratumResult<EmitReport>;
}

/// Port for the post-configuration step.
///
/// Invoked once per run, after the transport facade is registered, with the
/// generated configuration class.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigHook: Send + Sync {
    fn post_config(&self, config: &mut ClassDefinition) -> StratumResult<()>;
}

/// Hook that leaves the configuration class unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopConfigHook;

impl ConfigHook for NoopConfigHook {
    fn post_config(&self, _config: &mut ClassDefinition) -> StratumResult<()> {
        Ok(())
    }
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stratum_adapters::filesystem::LocalFilesystem` (production)
/// - `stratum_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StratumResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> StratumResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> StratumResult<()>;
}

/// What an emitter wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    pub root: PathBuf,
    /// Written files, in write order.
    pub files: Vec<PathBuf>,
}

impl EmitReport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Vec::new(),
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}
