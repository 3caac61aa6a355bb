//! Application services - orchestrate use cases.
//!
//! `GenerationService` runs the full load, build, and emit workflow;
//! `GenerationRun` exposes the individual build steps of one run.

pub mod generation_run;
pub mod generation_service;

pub use generation_run::GenerationRun;
pub use generation_service::{GenerationOutcome, GenerationService};
