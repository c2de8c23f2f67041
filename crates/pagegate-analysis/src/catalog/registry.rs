//! RuleCatalog: the immutable set of rules a process validates with.

use rustc_hash::FxHashSet;

use pagegate_core::config::PagegateConfig;
use pagegate_core::errors::CatalogError;

use super::meta;
use super::rules::{self, Rule};
use super::types::FixKind;
use crate::autofix::AboveFoldClassifier;

/// Constructed once, then shared by reference across any number of
/// concurrent validations.
pub struct RuleCatalog {
    rules: Vec<Box<dyn Rule>>,
    classifier: AboveFoldClassifier,
    default_lang: String,
}

impl RuleCatalog {
    /// Built-in rules tuned by `config`, minus `[rules].disabled`.
    pub fn new(config: &PagegateConfig) -> Result<Self, CatalogError> {
        for id in &config.rules.disabled {
            if meta::lookup(id).is_none() {
                return Err(CatalogError::UnknownRuleId(id.clone()));
            }
        }
        let classifier = AboveFoldClassifier::from_config(&config.autofix)?;
        let mut rules = rules::builtin_rules(config, &classifier)?;
        rules.retain(|r| !config.rules.is_disabled(r.id()));

        tracing::debug!(
            rules = rules.len(),
            disabled = config.rules.disabled.len(),
            "rule catalog built"
        );
        Self::assemble(rules, classifier, config)
    }

    pub fn with_defaults() -> Result<Self, CatalogError> {
        Self::new(&PagegateConfig::default())
    }

    /// A catalog of caller-supplied rules, in the given order.
    pub fn with_rules(
        rules: Vec<Box<dyn Rule>>,
        config: &PagegateConfig,
    ) -> Result<Self, CatalogError> {
        let classifier = AboveFoldClassifier::from_config(&config.autofix)?;
        Self::assemble(rules, classifier, config)
    }

    fn assemble(
        rules: Vec<Box<dyn Rule>>,
        classifier: AboveFoldClassifier,
        config: &PagegateConfig,
    ) -> Result<Self, CatalogError> {
        let mut seen = FxHashSet::default();
        for rule in &rules {
            if !seen.insert(rule.id()) {
                return Err(CatalogError::DuplicateRuleId(rule.id().to_string()));
            }
        }
        Ok(Self {
            rules,
            classifier,
            default_lang: config.autofix.effective_default_lang().to_string(),
        })
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule(&self, id: &str) -> Option<&dyn Rule> {
        self.rules.iter().find(|r| r.id() == id).map(|r| r.as_ref())
    }

    /// Declared position of a rule; the within-tier sort key.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.id() == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.id())
    }

    /// The transform registered for a rule, if the rule is active and fixable.
    pub fn fix_for(&self, id: &str) -> Option<FixKind> {
        self.rule(id).and_then(|r| r.meta().fix)
    }

    pub fn classifier(&self) -> &AboveFoldClassifier {
        &self.classifier
    }

    pub fn default_lang(&self) -> &str {
        &self.default_lang
    }
}

impl std::fmt::Debug for RuleCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleCatalog")
            .field("rules", &self.ids().collect::<Vec<_>>())
            .field("default_lang", &self.default_lang)
            .finish()
    }
}
