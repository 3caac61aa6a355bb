//! File-backed domain model store.
//!
//! Models live under a root directory as `.toml` or `.json` files. A model
//! is found by file stem first (`<root>/<name>.toml`, then `.json`), then by
//! scanning the tree for a file whose `name` matches.

use std::path::{Path, PathBuf};

use stratum_core::{
    application::{ApplicationError, ports::DomainModelStore},
    domain::App,
    error::StratumResult,
};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use super::manifest::{ModelFormat, ModelManifest};

/// Directory of model files.
#[derive(Debug, Clone)]
pub struct FileModelStore {
    root: PathBuf,
}

impl FileModelStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load a single model file. The file stem names the app when the file
    /// has no `name`.
    pub fn load_file(path: &Path) -> StratumResult<App> {
        let manifest = ModelManifest::read(path)?;
        Ok(manifest.into_app(&file_stem(path)))
    }

    /// Every parseable model under the root, in path order.
    ///
    /// Unreadable or malformed files are skipped with a warning.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn scan(&self) -> StratumResult<Vec<(PathBuf, App)>> {
        self.ensure_root()?;

        let mut apps = Vec::new();
        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() || ModelFormat::from_path(entry.path()).is_none() {
                continue;
            }

            match Self::load_file(entry.path()) {
                Ok(app) => apps.push((entry.into_path(), app)),
                Err(e) => warn!(
                    path = %entry.path().display(),
                    error = %e,
                    "skipping invalid model file"
                ),
            }
        }

        debug!(count = apps.len(), "scanned model files");
        Ok(apps)
    }

    fn ensure_root(&self) -> StratumResult<()> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(ApplicationError::StoreAccess {
                reason: format!("model directory '{}' does not exist", self.root.display()),
            }
            .into())
        }
    }

    fn direct_path(&self, name: &str) -> Option<PathBuf> {
        [ModelFormat::Toml, ModelFormat::Json]
            .iter()
            .map(|format| self.root.join(format!("{name}.{}", format.extension())))
            .find(|path| path.is_file())
    }
}

impl DomainModelStore for FileModelStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn load_app(&self, name: &str) -> StratumResult<App> {
        self.ensure_root()?;

        if let Some(path) = self.direct_path(name) {
            debug!(path = %path.display(), "loading model file");
            return Self::load_file(&path);
        }

        self.scan()?
            .into_iter()
            .find(|(_, app)| app.name == name)
            .map(|(_, app)| app)
            .ok_or_else(|| {
                ApplicationError::ModelNotFound {
                    name: name.to_string(),
                }
                .into()
            })
    }

    fn list_apps(&self) -> StratumResult<Vec<String>> {
        let mut names: Vec<String> = self.scan()?.into_iter().map(|(_, app)| app.name).collect();
        names.sort();
        names.dedup();
        Ok(names)
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
