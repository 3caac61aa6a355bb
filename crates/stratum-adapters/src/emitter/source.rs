//! Emitter writing one `.java` file per generated class.

use std::path::{Path, PathBuf};

use stratum_core::{
    application::{
        GeneratedModel,
        ports::{EmitReport, Filesystem, ModelEmitter},
    },
    domain::ClassDefinition,
    error::StratumResult,
};
use tracing::{debug, instrument};

use super::render::render_class;

/// Writes `<out_dir>/<package path>/<Name>.java` for every emittable class.
pub struct SourceEmitter {
    fs: Box<dyn Filesystem>,
    out_dir: PathBuf,
}

impl SourceEmitter {
    pub fn new(fs: impl Filesystem + 'static, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs: Box::new(fs),
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Where `class` is written.
    pub fn path_for(&self, class: &ClassDefinition) -> PathBuf {
        let mut path = self.out_dir.clone();
        for segment in class.package().split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.java", class.name()));
        path
    }
}

impl ModelEmitter for SourceEmitter {
    #[instrument(skip_all, fields(app = %model.app_name, out = %self.out_dir.display()))]
    fn emit(&self, model: &GeneratedModel) -> StratumResult<EmitReport> {
        let mut report = EmitReport::new(&self.out_dir);

        for class in model.emittable() {
            let source = render_class(model, class)?;
            let path = self.path_for(class);
            if let Some(parent) = path.parent() {
                self.fs.create_dir_all(parent)?;
            }
            self.fs.write_file(&path, &source)?;
            debug!(class = %class.qualified_name(), path = %path.display(), "wrote class");
            report.files.push(path);
        }

        Ok(report)
    }
}
