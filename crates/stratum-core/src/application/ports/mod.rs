//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stratum-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `DomainModelStore`: Domain model lookup
//!   - `ModelEmitter`: Emission of the finished class model
//!   - `ConfigHook`: Post-configuration of the generated config class
//!   - `Filesystem`: File operations used by emitters
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `GenerationService`

pub mod output;

pub use output::{
    ConfigHook, DomainModelStore, EmitReport, Filesystem, ModelEmitter, NoopConfigHook,
};

#[cfg(test)]
pub use output::{MockConfigHook, MockDomainModelStore, MockFilesystem, MockModelEmitter};
