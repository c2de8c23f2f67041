//! AutoFixEngine: threads markup through the ordered transform list.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use pagegate_core::errors::{ErrorCode, FixError};

use super::transforms::{self, FixContext, FixOutcome};
use crate::catalog::{FixKind, RuleCatalog};
use crate::fault;
use crate::validation::{ValidationEngine, ValidationResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoFixResult {
    pub fixed: String,
    /// Human-readable description of every transform that changed the markup.
    pub applied_fixes: Vec<String>,
    /// Rule ids whose transforms applied, in fix order.
    pub resolved_rules: Vec<String>,
}

impl AutoFixResult {
    fn unchanged(html: &str) -> Self {
        Self {
            fixed: html.to_string(),
            applied_fixes: Vec::new(),
            resolved_rules: Vec::new(),
        }
    }

    pub fn changed(&self) -> bool {
        !self.applied_fixes.is_empty()
    }
}

pub struct AutoFixEngine<'c> {
    validator: ValidationEngine<'c>,
}

impl<'c> AutoFixEngine<'c> {
    pub fn new(catalog: &'c RuleCatalog) -> Self {
        Self::with_validator(ValidationEngine::new(catalog))
    }

    pub fn with_validator(validator: ValidationEngine<'c>) -> Self {
        Self { validator }
    }

    fn catalog(&self) -> &'c RuleCatalog {
        self.validator.catalog()
    }

    /// Repair the fixable findings of `result`, which must come from
    /// validating `html`.
    ///
    /// A transform runs when its rule is in `result`, or when an earlier
    /// transform in this call changed the markup and a fresh check of its rule
    /// fires. When anything changed, one settling pass re-checks every
    /// fixable rule against the final markup so the output is a fixed point.
    pub fn auto_fix(&self, html: &str, result: &ValidationResult) -> AutoFixResult {
        if !result.has_fixable() {
            debug!("no fixable findings; skipping auto-fix");
            return AutoFixResult::unchanged(html);
        }

        let catalog = self.catalog();
        let ctx = FixContext {
            classifier: catalog.classifier(),
            default_lang: catalog.default_lang(),
        };
        let mut out = AutoFixResult::unchanged(html);

        for kind in FixKind::ORDER {
            let rule_id = kind.rule_id();
            if catalog.fix_for(rule_id) != Some(kind) {
                continue;
            }
            let flagged = result.has_rule(rule_id) || (out.changed() && self.still_fires(rule_id, &out.fixed));
            if flagged {
                self.attempt(kind, &ctx, &mut out);
            }
        }

        if out.changed() {
            for kind in FixKind::ORDER {
                let rule_id = kind.rule_id();
                if catalog.fix_for(rule_id) == Some(kind) && self.still_fires(rule_id, &out.fixed) {
                    self.attempt(kind, &ctx, &mut out);
                }
            }
        }

        info!(
            applied = out.applied_fixes.len(),
            bytes_before = html.len(),
            bytes_after = out.fixed.len(),
            "auto-fix complete"
        );
        out
    }

    fn still_fires(&self, rule_id: &str, html: &str) -> bool {
        !self.validator.check_rule(rule_id, html, None, None).is_empty()
    }

    /// Run one transform in isolation. Errors and panics count as "not applied".
    fn attempt(&self, kind: FixKind, ctx: &FixContext<'_>, out: &mut AutoFixResult) {
        let outcome = match fault::isolate(|| transforms::run_transform(kind, &out.fixed, ctx)) {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => return log_failure(&err),
            Err(message) => {
                return log_failure(&FixError::Panicked {
                    fix: kind.as_str().to_string(),
                    message,
                })
            }
        };
        let FixOutcome {
            html,
            applied,
            description,
        } = outcome;
        if !applied {
            debug!(fix = kind.as_str(), "transform not applied");
            return;
        }
        debug!(fix = kind.as_str(), "transform applied");
        out.fixed = html;
        out.applied_fixes
            .push(description.unwrap_or_else(|| kind.as_str().to_string()));
        let rule_id = kind.rule_id().to_string();
        if !out.resolved_rules.contains(&rule_id) {
            out.resolved_rules.push(rule_id);
        }
    }
}

fn log_failure(err: &FixError) {
    warn!(error = %err.coded_message(), "fix transform failed; skipping");
}
