//! Validation engine and its result type.

pub mod engine;
pub mod result;

pub use engine::ValidationEngine;
pub use result::ValidationResult;
