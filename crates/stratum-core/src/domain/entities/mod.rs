pub mod app;
pub mod class_def;
pub mod class_model;

pub use app::{App, Entity, EntityAttribute, TypeDef};
pub use class_def::ClassDefinition;
pub use class_model::ClassModel;
