//! Fix transform failures.

use super::error_code::{self, ErrorCode};

/// Errors raised by a fix transform. Treated as "not applied" by the engine.
#[derive(Debug, thiserror::Error)]
pub enum FixError {
    #[error("Fix {fix} failed: {message}")]
    TransformFailed { fix: String, message: String },

    #[error("Fix {fix} panicked: {message}")]
    Panicked { fix: String, message: String },
}

impl ErrorCode for FixError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::TransformFailed { .. } => error_code::FIX_FAILED,
            Self::Panicked { .. } => error_code::FIX_PANIC,
        }
    }
}
