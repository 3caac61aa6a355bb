//! On-disk domain model format.
//!
//! A model file is TOML or JSON:
//!
//! ```toml
//! name = "Shop"
//! base_package = "app."
//! standard_types = true
//!
//! [[types]]
//! name = "Products"
//! class_name = "java.util.List<app.Product>"
//!
//! [[entities]]
//! name = "Order"
//! attributes = [
//!   { name = "id", type = "Long" },
//!   { name = "item", type = "Product" },
//! ]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stratum_core::{
    domain::{App, DomainError, Entity, TypeDef},
    error::StratumError,
};
use thiserror::Error;

/// Why a model file could not be loaded.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("'{}' is not a .toml or .json model file", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {format} model: {reason}")]
    Syntax { format: &'static str, reason: String },

    #[error("failed to parse '{}': {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
}

impl From<ManifestError> for StratumError {
    fn from(err: ManifestError) -> Self {
        DomainError::InvalidModel(err.to_string()).into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Toml,
    Json,
}

impl ModelFormat {
    /// Format by file extension; `None` for anything else.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelManifest {
    /// Defaults to the file stem.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub base_package: Option<String>,
    /// Add `Long`, `String`, and the other common scalar types to the catalog.
    #[serde(default)]
    pub standard_types: bool,
    #[serde(default)]
    pub types: Vec<TypeDef>,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl ModelManifest {
    pub fn parse(raw: &str, format: ModelFormat) -> Result<Self, ManifestError> {
        let syntax = |reason: String| ManifestError::Syntax {
            format: format.extension(),
            reason,
        };
        match format {
            ModelFormat::Toml => toml::from_str(raw).map_err(|e| syntax(e.to_string())),
            ModelFormat::Json => serde_json::from_str(raw).map_err(|e| syntax(e.to_string())),
        }
    }

    /// Read and parse a model file.
    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        let format = ModelFormat::from_path(path).ok_or_else(|| ManifestError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let raw = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, format).map_err(|e| match e {
            ManifestError::Syntax { reason, .. } => ManifestError::Parse {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }

    pub fn into_app(self, fallback_name: &str) -> App {
        let mut app = App::new(self.name.unwrap_or_else(|| fallback_name.to_string()));
        app.base_package = self.base_package;
        app.types = self.types;
        app.entities = self.entities;
        if self.standard_types {
            app = app.with_standard_types();
        }
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOP_TOML: &str = r#"
base_package = "app."
standard_types = true

[[types]]
name = "Products"
class_name = "java.util.List<app.Product>"

[[entities]]
name = "Order"
attributes = [
  { name = "id", type = "Long" },
  { name = "item", type = "Product" },
]

[[entities]]
name = "Product"
attributes = [{ name = "id", type = "Long" }]
"#;

    #[test]
    fn toml_manifest_uses_fallback_name() {
        let app = ModelManifest::parse(SHOP_TOML, ModelFormat::Toml)
            .unwrap()
            .into_app("shop");

        assert_eq!(app.name, "shop");
        assert_eq!(app.entities.len(), 2);
        assert_eq!(app.entities[0].attributes[1].type_name, "Product");
        assert_eq!(app.find_type("Products").unwrap().class_name, "java.util.List<app.Product>");
        assert!(app.find_type("String").is_some());
    }

    #[test]
    fn json_manifest_with_explicit_name() {
        let raw = r#"{
            "name": "Shop",
            "entities": [{"name": "Order", "attributes": [{"name": "id", "type": "Long"}]}],
            "types": [{"name": "Long", "class_name": "java.lang.Long"}]
        }"#;
        let app = ModelManifest::parse(raw, ModelFormat::Json)
            .unwrap()
            .into_app("ignored");

        assert_eq!(app.name, "Shop");
        assert_eq!(app.types.len(), 1);
        assert!(app.base_package.is_none());
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(ModelFormat::from_path(Path::new("a/Shop.TOML")), Some(ModelFormat::Toml));
        assert_eq!(ModelFormat::from_path(Path::new("Shop.json")), Some(ModelFormat::Json));
        assert_eq!(ModelFormat::from_path(Path::new("Shop.yaml")), None);
        assert_eq!(ModelFormat::from_path(Path::new("Shop")), None);
    }

    #[test]
    fn malformed_manifest_is_a_syntax_error() {
        let err = ModelManifest::parse("entities = 3", ModelFormat::Toml).unwrap_err();
        assert!(matches!(err, ManifestError::Syntax { format: "toml", .. }));
    }

    #[test]
    fn manifest_errors_become_invalid_model() {
        let err: StratumError = ManifestError::UnsupportedFormat {
            path: PathBuf::from("Shop.yaml"),
        }
        .into();
        assert!(matches!(
            err.as_domain(),
            Some(DomainError::InvalidModel(msg)) if msg.contains("Shop.yaml")
        ));
    }
}
