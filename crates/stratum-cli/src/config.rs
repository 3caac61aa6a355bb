//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI owns it; the core only ever sees the [`GenerationOptions`] inside.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call-site, not here)
//! 2. `STRATUM_*` environment variables, `__` between sections
//!    (`STRATUM_MODELS__DIR=./models`)
//! 3. `--config <FILE>` when given
//! 4. `./.stratum.toml`
//! 5. The global file in the platform config directory
//! 6. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use stratum_core::application::GenerationOptions;

pub const LOCAL_CONFIG_FILE: &str = ".stratum.toml";
const ENV_PREFIX: &str = "STRATUM";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub models: ModelsConfig,
    pub output: OutputConfig,
    /// Defaults for every generation run.
    pub generation: GenerationOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Directory searched for `*.toml` / `*.json` model files.
    pub dir: PathBuf,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("models"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory for generated sources.
    pub dir: PathBuf,
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("generated"),
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, config files, and the environment.
    ///
    /// `config_file` is the path passed with `--config`; unlike the implicit
    /// locations it must exist.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("failed to build default configuration")?;

        let mut builder = Config::builder().add_source(defaults);
        if let Some(global) = Self::config_path() {
            builder = builder.add_source(File::from(global).required(false));
        }
        builder = builder.add_source(File::from(Path::new(LOCAL_CONFIG_FILE)).required(false));
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Path of the global configuration file, if the platform has a config
    /// directory.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stratum", "stratum")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Value at a dotted key path, e.g. `generation.facade_conflict`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut value = serde_json::to_value(self).ok()?;
        for segment in key.split('.') {
            value = value.get_mut(segment)?.take();
        }
        Some(value)
    }
}
