//! JSON reporter. Field names follow the camelCase wire contract.

use pagegate_core::errors::ReportError;

use super::Reporter;
use crate::validation::ValidationResult;

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, result: &ValidationResult) -> Result<String, ReportError> {
        serde_json::to_string_pretty(result).map_err(|e| ReportError::Serialization(e.to_string()))
    }
}
