//! Document model: tokenizer, line index, and structural queries.
//!
//! Malformed or partial markup never fails to parse; missing structure is
//! reported as absent rather than raised.

pub mod lines;
pub mod model;
pub mod tokenizer;

pub use lines::LineIndex;
pub use model::DocumentModel;
pub use tokenizer::{Attribute, Tag, TagKind};
