//! ValidationEngine: runs the catalog against a document.

use tracing::{debug, warn};

use pagegate_core::config::ScoringConfig;
use pagegate_core::errors::{ErrorCode, RuleError};

use super::result::ValidationResult;
use crate::catalog::{meta, Finding, Rule, RuleCatalog, RuleContext};
use crate::document::DocumentModel;
use crate::fault;
use crate::scoring::Scorer;

/// Stateless between calls; borrow one per catalog and share it freely.
#[derive(Debug, Clone, Copy)]
pub struct ValidationEngine<'c> {
    catalog: &'c RuleCatalog,
    scorer: Scorer,
}

impl<'c> ValidationEngine<'c> {
    pub fn new(catalog: &'c RuleCatalog) -> Self {
        Self::with_scorer(catalog, Scorer::default())
    }

    pub fn with_scorer(catalog: &'c RuleCatalog, scorer: Scorer) -> Self {
        Self { catalog, scorer }
    }

    pub fn from_config(catalog: &'c RuleCatalog, scoring: &ScoringConfig) -> Self {
        Self::with_scorer(catalog, Scorer::new(scoring))
    }

    pub fn catalog(&self) -> &'c RuleCatalog {
        self.catalog
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Validate markup plus optional stylesheet and script sources.
    ///
    /// Never fails: a rule that errors or panics contributes one
    /// `internal/rule-fault` warning instead of its findings.
    pub fn validate_all(&self, html: &str, css: Option<&str>, js: Option<&str>) -> ValidationResult {
        self.validate_rules(self.catalog.rules().iter().map(|r| r.as_ref()), html, css, js)
    }

    /// Validate with only the listed rules. Ids not in the catalog are ignored.
    pub fn validate_subset(
        &self,
        rule_ids: &[&str],
        html: &str,
        css: Option<&str>,
        js: Option<&str>,
    ) -> ValidationResult {
        let rules = self
            .catalog
            .rules()
            .iter()
            .map(|r| r.as_ref())
            .filter(|r| rule_ids.contains(&r.id()));
        self.validate_rules(rules, html, css, js)
    }

    /// Findings of a single rule, used by the fixer to re-check its work.
    pub fn check_rule(&self, rule_id: &str, html: &str, css: Option<&str>, js: Option<&str>) -> Vec<Finding> {
        let Some(rule) = self.catalog.rule(rule_id) else {
            return Vec::new();
        };
        let doc = DocumentModel::parse(html);
        let ctx = RuleContext::new(&doc, css, js);
        self.run_rule(rule, &ctx)
    }

    fn validate_rules<'r>(
        &self,
        rules: impl Iterator<Item = &'r dyn Rule>,
        html: &str,
        css: Option<&str>,
        js: Option<&str>,
    ) -> ValidationResult {
        let doc = DocumentModel::parse(html);
        let ctx = RuleContext::new(&doc, css, js);

        let mut findings = Vec::new();
        let mut rules_run = 0usize;
        for rule in rules {
            findings.extend(self.run_rule(rule, &ctx));
            rules_run += 1;
        }
        // Rules run in declared order, so a stable sort by tier leaves
        // each tier in catalog order.
        findings.sort_by_key(|f| f.severity_tier);

        let score = self.scorer.score(&findings);
        debug!(
            rules = rules_run,
            findings = findings.len(),
            score = score.score,
            passed = score.passed,
            "validation complete"
        );
        ValidationResult::from_findings(findings, score)
    }

    fn run_rule(&self, rule: &dyn Rule, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let err = match fault::isolate(|| rule.check(ctx)) {
            Ok(Ok(findings)) => return findings,
            Ok(Err(err)) => err,
            Err(message) => RuleError::Panicked {
                rule_id: rule.id().to_string(),
                message,
            },
        };
        warn!(rule = rule.id(), error = %err, "rule faulted");
        vec![Finding::new(&meta::RULE_FAULT, err.coded_message(), None)]
    }
}
