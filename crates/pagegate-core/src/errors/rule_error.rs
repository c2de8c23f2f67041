//! Rule execution faults.

use super::error_code::{self, ErrorCode};

/// A fault raised while a single rule inspects a document.
///
/// Never escapes validation: the engine turns it into one internal finding.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Rule {rule_id} failed: {message}")]
    CheckFailed { rule_id: String, message: String },

    #[error("Rule {rule_id} panicked: {message}")]
    Panicked { rule_id: String, message: String },
}

impl RuleError {
    pub fn rule_id(&self) -> &str {
        match self {
            Self::CheckFailed { rule_id, .. } | Self::Panicked { rule_id, .. } => rule_id,
        }
    }
}

impl ErrorCode for RuleError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CheckFailed { .. } => error_code::RULE_FAULT,
            Self::Panicked { .. } => error_code::RULE_PANIC,
        }
    }
}
