//! Reporters: output formats for validation results.

pub mod console;
pub mod json;

use pagegate_core::errors::ReportError;

use crate::validation::ValidationResult;

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, result: &ValidationResult) -> Result<String, ReportError>;
}

/// Create a reporter by format name.
pub fn create_reporter(format: &str) -> Result<Box<dyn Reporter>, ReportError> {
    match format {
        "json" => Ok(Box::new(json::JsonReporter)),
        "console" => Ok(Box::new(console::ConsoleReporter::default())),
        other => Err(ReportError::UnknownFormat(other.to_string())),
    }
}

/// List all available reporter format names.
pub fn available_formats() -> &'static [&'static str] {
    &["json", "console"]
}
