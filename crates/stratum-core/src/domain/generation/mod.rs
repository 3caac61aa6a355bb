//! The layered generation engine.
//!
//! Pure functions over a [`ClassModel`](crate::domain::ClassModel); no I/O.
//! Build order and failure aggregation live in the application layer.

pub mod class_builder;
pub mod config;
pub mod crud;
pub mod facade;
pub mod registry;
pub mod type_resolver;

pub use class_builder::ClassBuilder;
pub use facade::{FacadeHandle, build_facade};
pub use registry::GenerationRegistry;
pub use type_resolver::{TypeExpr, TypeResolver};
