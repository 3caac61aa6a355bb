//! Core domain layer for Stratum.
//!
//! Pure generation logic: the input model, the class arena, the per-layer
//! policy table, and the builders that turn one into the other. No I/O;
//! loading and emission happen behind ports in the application layer.

pub mod entities;
pub mod error;
pub mod generation;
pub mod naming;
pub mod policy;
pub mod value_objects;

mod validation;

pub use entities::{
    app::{App, Entity, EntityAttribute, TypeDef},
    class_def::{
        BuildState, ClassDefinition, ClassId, ClassKind, Delegation, FieldDef, FieldType,
        MethodDef, MethodKind, Param, Tag, Visibility,
    },
    class_model::ClassModel,
};

pub use error::{DomainError, DomainResult, ErrorCategory};

pub use generation::{
    ClassBuilder, FacadeHandle, GenerationRegistry, TypeExpr, TypeResolver, build_facade,
};

pub use policy::{LayerPolicy, policy_for};
pub use validation::DomainValidator;
pub use value_objects::{CrudOp, Layer};
