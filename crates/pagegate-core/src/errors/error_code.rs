//! ErrorCode trait for structured error reporting.

/// Trait for mapping pagegate errors to stable error code strings.
/// Every error enum implements this so callers (HTTP handlers, report UIs)
/// can branch on a code instead of parsing messages.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "RULE_FAULT").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_message(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CATALOG_ERROR: &str = "CATALOG_ERROR";
pub const INVALID_PATTERN: &str = "INVALID_PATTERN";
pub const UNKNOWN_RULE: &str = "UNKNOWN_RULE";
pub const RULE_FAULT: &str = "RULE_FAULT";
pub const RULE_PANIC: &str = "RULE_PANIC";
pub const FIX_FAILED: &str = "FIX_FAILED";
pub const FIX_PANIC: &str = "FIX_PANIC";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const REPORT_ERROR: &str = "REPORT_ERROR";
