//! Rule catalog construction errors.

use super::error_code::{self, ErrorCode};

/// Errors that can occur while building the rule catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid detection pattern for {rule_id}: {message}")]
    InvalidPattern { rule_id: String, message: String },

    #[error("Duplicate rule id: {0}")]
    DuplicateRuleId(String),

    #[error("Unknown rule id: {0}")]
    UnknownRuleId(String),
}

impl ErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPattern { .. } => error_code::INVALID_PATTERN,
            Self::DuplicateRuleId(_) => error_code::CATALOG_ERROR,
            Self::UnknownRuleId(_) => error_code::UNKNOWN_RULE,
        }
    }
}
