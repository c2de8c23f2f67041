//! Rule trait and the built-in rule set.

pub mod accessibility;
pub mod performance;
pub mod security;
pub mod seo;
pub mod structure;

use pagegate_core::config::PagegateConfig;
use pagegate_core::errors::{CatalogError, RuleError};

use super::meta;
use super::types::{Finding, RuleMeta};
use crate::autofix::AboveFoldClassifier;
use crate::document::DocumentModel;

/// Everything a rule may inspect for one validation run.
pub struct RuleContext<'a> {
    pub doc: &'a DocumentModel<'a>,
    pub css: Option<&'a str>,
    pub js: Option<&'a str>,
}

impl<'a> RuleContext<'a> {
    pub fn new(doc: &'a DocumentModel<'a>, css: Option<&'a str>, js: Option<&'a str>) -> Self {
        Self { doc, css, js }
    }

    /// Finding located at a markup byte offset.
    pub fn finding_at(&self, meta: &RuleMeta, offset: usize, message: impl Into<String>) -> Finding {
        Finding::new(meta, message, Some(self.doc.line_of(offset)))
    }
}

/// A single check in the catalog.
///
/// Implementations must be independent of each other: a rule sees only the
/// document and never another rule's output.
pub trait Rule: Send + Sync {
    fn meta(&self) -> &'static RuleMeta;

    fn check(&self, ctx: &RuleContext<'_>) -> Result<Vec<Finding>, RuleError>;

    fn id(&self) -> &'static str {
        self.meta().id
    }
}

/// Build every built-in rule in declared order.
pub fn builtin_rules(
    config: &PagegateConfig,
    classifier: &AboveFoldClassifier,
) -> Result<Vec<Box<dyn Rule>>, CatalogError> {
    let rules: Vec<Box<dyn Rule>> = vec![
        Box::new(structure::DoctypeRule),
        Box::new(structure::CharsetRule),
        Box::new(structure::ViewportRule),
        Box::new(structure::HtmlLangRule),
        Box::new(structure::TitleRule),
        Box::new(structure::SingleH1Rule),
        Box::new(structure::HeadingHierarchyRule),
        Box::new(seo::MetaDescriptionRule),
        Box::new(seo::OpenGraphRule),
        Box::new(accessibility::ImgAltRule),
        Box::new(accessibility::ImgAltTextRule::new()?),
        Box::new(accessibility::FormLabelRule),
        Box::new(accessibility::LinkTextRule),
        Box::new(accessibility::ButtonNameRule),
        Box::new(accessibility::ColorContrastRule),
        Box::new(performance::ImgLazyLoadingRule::new(classifier.clone())),
        Box::new(performance::ScriptLoadingRule::new(
            config.rules.effective_max_external_scripts(),
        )),
        Box::new(security::TargetBlankRule),
        Box::new(security::InlineHandlerRule),
        Box::new(security::UnsafeSinkRule::new()?),
        Box::new(security::HardcodedSecretRule::new(
            &config.rules.extra_secret_patterns,
        )?),
    ];
    debug_assert_eq!(rules.len(), meta::ALL.len());
    Ok(rules)
}

/// Case-insensitive attribute equality, trimming surrounding whitespace.
pub(crate) fn attr_is(value: Option<&str>, expected: &str) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case(expected))
}

pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
