//! Domain value objects: Layer and CrudOp.
//!
//! Pure value types: `Copy`, equality-by-value, no identity. Per-layer
//! behaviour (naming, tagging, delegation) lives in `policy.rs`; this file
//! only defines the types, their ordering, and their string forms.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Layer ─────────────────────────────────────────────────────────────────────

/// A generation target.
///
/// The declaration order is the build order: every layer depends on the one
/// immediately below it, and `Persistence` depends on nothing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Persistence,
    Business,
    Transport,
}

impl Layer {
    /// All layers in build order.
    pub const ALL: [Layer; 3] = [Layer::Persistence, Layer::Business, Layer::Transport];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Persistence => "persistence",
            Self::Business => "business",
            Self::Transport => "transport",
        }
    }

    /// The layer this one depends on, or `None` for the lowest layer.
    pub const fn below(self) -> Option<Layer> {
        match self {
            Self::Persistence => None,
            Self::Business => Some(Self::Persistence),
            Self::Transport => Some(Self::Business),
        }
    }

    pub const fn is_lowest(self) -> bool {
        self.below().is_none()
    }

    /// The policy table entry for this layer.
    pub fn policy(self) -> &'static crate::domain::policy::LayerPolicy {
        crate::domain::policy::policy_for(self)
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layer {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "persistence" | "dao" | "do" | "data" => Ok(Self::Persistence),
            "business" | "biz" => Ok(Self::Business),
            "transport" | "service" | "dto" => Ok(Self::Transport),
            other => Err(DomainError::InvalidModel(format!("unknown layer: {other}"))),
        }
    }
}

// ── CrudOp ────────────────────────────────────────────────────────────────────

/// One operation of the fixed CRUD set synthesized for every class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrudOp {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl CrudOp {
    /// The synthesis order. Generated method groups always follow it.
    pub const ALL: [CrudOp; 5] = [
        CrudOp::Create,
        CrudOp::Read,
        CrudOp::Update,
        CrudOp::Delete,
        CrudOp::List,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::List => "list",
        }
    }

    /// Prefix of the generated method name (`get` for reads).
    pub const fn method_prefix(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "get",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::List => "list",
        }
    }

    /// Operation invoked on the external persistence collaborator by the
    /// lowest layer.
    pub const fn persistence_operation(&self) -> &'static str {
        match self {
            Self::Create => "persist",
            Self::Read => "find",
            Self::Update => "merge",
            Self::Delete => "remove",
            Self::List => "query",
        }
    }

    /// Whether the operation addresses a row by identifier.
    pub const fn takes_identifier(&self) -> bool {
        matches!(self, Self::Read | Self::Delete)
    }

    /// Generated method name for an entity, e.g. `getOrder`.
    pub fn method_name(&self, entity: &str) -> String {
        format!("{}{}", self.method_prefix(), entity)
    }
}

impl fmt::Display for CrudOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
