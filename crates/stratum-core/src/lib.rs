//! Stratum Core - layered application generation engine.
//!
//! This crate turns a declarative domain model (entities, attributes, types)
//! into a three-layer class model and wires the layers together through
//! generated facades, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stratum-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (GenerationService, GenerationRun)    │
//! │     Orchestrates the layer build order  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (DomainModelStore, ModelEmitter, Hook)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stratum-adapters (Infrastructure)    │
//! │ (FileModelStore, SourceEmitter, etc)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (App, ClassModel, generation engine)   │
//! │             No I/O                      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stratum_core::{
//!     application::{GenerationOptions, GenerationService},
//!     domain::{App, Entity},
//! };
//!
//! let app = App::new("Shop")
//!     .with_base_package("app.")
//!     .with_standard_types()
//!     .with_entity(Entity::new("Product").with_attribute("id", "Long"));
//!
//! // Adapters are injected; see `stratum-adapters`.
//! let service = GenerationService::new(store, emitter);
//! let model = service.generate_model(&app).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        EmitReport, FacadeConflictPolicy, GeneratedModel, GenerationOptions, GenerationRun,
        GenerationService, GenerationStep,
        ports::{ConfigHook, DomainModelStore, Filesystem, ModelEmitter, NoopConfigHook},
    };
    pub use crate::domain::{
        App, ClassDefinition, ClassId, ClassKind, ClassModel, CrudOp, Delegation, Entity,
        EntityAttribute, FacadeHandle, FieldDef, FieldType, Layer, MethodDef, MethodKind, Tag,
        TypeDef,
    };
    pub use crate::error::{StratumError, StratumResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
