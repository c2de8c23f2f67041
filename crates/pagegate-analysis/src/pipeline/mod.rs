//! Pipeline adapter: `Validate -> [AutoFix -> Validate] -> Report`.
//!
//! The fix step runs at most once per invocation. Re-validating and fixing in
//! a loop is not offered.

use serde::Serialize;
use tracing::info;

use pagegate_core::config::PagegateConfig;

use crate::autofix::{AutoFixEngine, AutoFixResult};
use crate::catalog::RuleCatalog;
use crate::validation::{ValidationEngine, ValidationResult};

/// Everything a caller needs to render or persist one document.
///
/// Serialize-only: the original markup stays out of the wire form, so a
/// report cannot be rebuilt from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub initial: ValidationResult,
    /// Present when a fix was attempted.
    pub fix: Option<AutoFixResult>,
    /// Validation of the markup returned by [`PipelineReport::output`].
    pub final_result: ValidationResult,
    #[serde(skip)]
    original: String,
}

impl PipelineReport {
    /// Markup to show or persist: the fixed markup when fixes applied,
    /// otherwise the original.
    pub fn output(&self) -> &str {
        match &self.fix {
            Some(fix) if fix.changed() => &fix.fixed,
            _ => &self.original,
        }
    }

    /// Only documents that a fix actually changed are worth writing back.
    pub fn should_persist(&self) -> bool {
        self.fix.as_ref().is_some_and(AutoFixResult::changed)
    }

    pub fn applied_fixes(&self) -> &[String] {
        self.fix
            .as_ref()
            .map(|f| f.applied_fixes.as_slice())
            .unwrap_or(&[])
    }
}

pub struct QualityPipeline<'c> {
    validator: ValidationEngine<'c>,
    fixer: AutoFixEngine<'c>,
}

impl<'c> QualityPipeline<'c> {
    pub fn new(catalog: &'c RuleCatalog, config: &PagegateConfig) -> Self {
        let validator = ValidationEngine::from_config(catalog, &config.scoring);
        Self {
            validator,
            fixer: AutoFixEngine::with_validator(validator),
        }
    }

    pub fn validator(&self) -> &ValidationEngine<'c> {
        &self.validator
    }

    /// Validate, and fix once if the document did not pass.
    pub fn run(&self, html: &str, css: Option<&str>, js: Option<&str>) -> PipelineReport {
        self.execute(html, css, js, false)
    }

    /// Validate and always attempt the single fix, e.g. for an explicit
    /// user request.
    pub fn run_forced(&self, html: &str, css: Option<&str>, js: Option<&str>) -> PipelineReport {
        self.execute(html, css, js, true)
    }

    fn execute(&self, html: &str, css: Option<&str>, js: Option<&str>, force: bool) -> PipelineReport {
        let initial = self.validator.validate_all(html, css, js);
        if initial.passed && !force {
            info!(score = initial.score, grade = %initial.grade, "document passed; no fix attempted");
            return PipelineReport {
                final_result: initial.clone(),
                initial,
                fix: None,
                original: html.to_string(),
            };
        }

        let fix = self.fixer.auto_fix(html, &initial);
        let final_result = if fix.changed() {
            self.validator.validate_all(&fix.fixed, css, js)
        } else {
            initial.clone()
        };
        info!(
            before = initial.score,
            after = final_result.score,
            passed = final_result.passed,
            fixes = fix.applied_fixes.len(),
            "pipeline complete"
        );
        PipelineReport {
            initial,
            fix: Some(fix),
            final_result,
            original: html.to_string(),
        }
    }
}
