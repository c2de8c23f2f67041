//! Console reporter: human-readable output with color codes.

use pagegate_core::errors::ReportError;

use super::Reporter;
use crate::catalog::{Finding, SeverityTier};
use crate::validation::ValidationResult;

/// Console reporter for human-readable terminal output.
pub struct ConsoleReporter {
    pub use_color: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn color_start(&self, tier: SeverityTier) -> &'static str {
        if !self.use_color {
            return "";
        }
        match tier {
            SeverityTier::Error => "\x1b[31m",   // red
            SeverityTier::Warning => "\x1b[33m", // yellow
            SeverityTier::Info => "\x1b[36m",    // cyan
        }
    }

    fn color_end(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }

    fn write_finding(&self, output: &mut String, finding: &Finding) {
        let location = finding
            .line
            .map(|l| format!("line {l}"))
            .unwrap_or_else(|| "document".to_string());
        output.push_str(&format!(
            "  {}{}{} [{}] {} ({}, -{})\n",
            self.color_start(finding.severity_tier),
            finding.severity_tier,
            self.color_end(),
            finding.rule_id,
            finding.message,
            location,
            finding.severity_weight,
        ));
        if let Some(ref suggestion) = finding.suggestion {
            let fix_tag = if finding.fixable { " (auto-fixable)" } else { "" };
            output.push_str(&format!("    Fix: {suggestion}{fix_tag}\n"));
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, result: &ValidationResult) -> Result<String, ReportError> {
        let mut output = String::new();

        let verdict = if result.passed { "PASSED" } else { "FAILED" };
        output.push_str(&format!(
            "Score: {}/100  Grade: {}  Result: {}\n",
            result.score, result.grade, verdict
        ));
        if !result.passed && result.has_auto_fail() {
            output.push_str("Critical findings fail the document regardless of score.\n");
        }

        for (title, findings) in [
            ("Errors", &result.errors),
            ("Warnings", &result.warnings),
            ("Info", &result.info),
        ] {
            if findings.is_empty() {
                continue;
            }
            output.push_str(&format!("\n{title} ({}):\n", findings.len()));
            for finding in findings {
                self.write_finding(&mut output, finding);
            }
        }

        output.push_str(&format!(
            "\n--- Summary: {} errors, {} warnings, {} info ---\n",
            result.errors.len(),
            result.warnings.len(),
            result.info.len()
        ));

        Ok(output)
    }
}
