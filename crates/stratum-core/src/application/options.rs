//! Per-run generation options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StratumError;

/// What to do when a layer's facade is requested a second time in one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacadeConflictPolicy {
    /// Return the facade already registered for the layer.
    #[default]
    Reuse,
    /// Abort the run.
    Fail,
}

impl fmt::Display for FacadeConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reuse => f.write_str("reuse"),
            Self::Fail => f.write_str("fail"),
        }
    }
}

impl FromStr for FacadeConflictPolicy {
    type Err = StratumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reuse" => Ok(Self::Reuse),
            "fail" => Ok(Self::Fail),
            other => Err(StratumError::Configuration {
                message: format!(
                    "unknown facade conflict policy '{other}' (expected reuse or fail)"
                ),
            }),
        }
    }
}

pub const DEFAULT_ID_TYPE: &str = "java.lang.Long";

/// Options of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Entities that receive business operations; `None` selects all.
    pub business_entities: Option<Vec<String>>,
    pub facade_conflict: FacadeConflictPolicy,
    /// Identifier type for entities without an `id` attribute.
    pub default_id_type: String,
    /// Whether the configuration class is handed to the emitter.
    pub emit_config_class: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            business_entities: None,
            facade_conflict: FacadeConflictPolicy::default(),
            default_id_type: DEFAULT_ID_TYPE.to_string(),
            emit_config_class: true,
        }
    }
}

impl GenerationOptions {
    pub fn with_business_entities<I, S>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.business_entities = Some(entities.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_facade_conflict(mut self, policy: FacadeConflictPolicy) -> Self {
        self.facade_conflict = policy;
        self
    }

    pub fn with_default_id_type(mut self, id_type: impl Into<String>) -> Self {
        self.default_id_type = id_type.into();
        self
    }

    pub fn with_emit_config_class(mut self, emit: bool) -> Self {
        self.emit_config_class = emit;
        self
    }
}
