//! Emitters for finished class models.

mod render;
mod source;

pub use render::{annotation, render_class};
pub use source::SourceEmitter;
