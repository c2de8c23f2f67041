//! Report rendering errors.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Unknown report format: {0}")]
    UnknownFormat(String),
}

impl ErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        error_code::REPORT_ERROR
    }
}
