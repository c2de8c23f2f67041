//! Core types for the rule catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Structure,
    Seo,
    Accessibility,
    Performance,
    Security,
    /// Synthetic findings raised by the engine itself.
    Internal,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Seo => "seo",
            Self::Accessibility => "accessibility",
            Self::Performance => "performance",
            Self::Security => "security",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity tier; decides which bucket of a result a finding lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Error,
    Warning,
    Info,
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// Sub-severity within a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Critical,
    High,
    Medium,
    Low,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Tier plus impact; the unit the scoring table is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Severity {
    pub tier: SeverityTier,
    pub impact: Impact,
}

impl Severity {
    pub const fn new(tier: SeverityTier, impact: Impact) -> Self {
        Self { tier, impact }
    }

    pub const fn error(impact: Impact) -> Self {
        Self::new(SeverityTier::Error, impact)
    }

    pub const fn warning(impact: Impact) -> Self {
        Self::new(SeverityTier::Warning, impact)
    }

    pub const fn info(impact: Impact) -> Self {
        Self::new(SeverityTier::Info, impact)
    }

    /// Points deducted from the score for one finding.
    pub const fn weight(&self) -> u32 {
        match (self.tier, self.impact) {
            (SeverityTier::Error, Impact::Critical) => 15,
            (SeverityTier::Error, Impact::High) => 10,
            (SeverityTier::Error, Impact::Medium) => 5,
            (SeverityTier::Error, Impact::Low) => 2,
            (SeverityTier::Warning, Impact::Critical) => 10,
            (SeverityTier::Warning, Impact::High) => 7,
            (SeverityTier::Warning, Impact::Medium) => 4,
            (SeverityTier::Warning, Impact::Low) => 2,
            (SeverityTier::Info, Impact::Critical) => 5,
            (SeverityTier::Info, Impact::High) => 3,
            (SeverityTier::Info, Impact::Medium) => 2,
            (SeverityTier::Info, Impact::Low) => 1,
        }
    }

    /// A critical error fails the document regardless of score.
    pub const fn is_auto_fail(&self) -> bool {
        matches!(
            (self.tier, self.impact),
            (SeverityTier::Error, Impact::Critical)
        )
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tier, self.impact)
    }
}

/// The enumerated auto-fix transforms, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FixKind {
    InsertDoctype,
    InsertCharset,
    InsertViewport,
    InsertLang,
    LazyLoadImages,
    SecureTargetBlank,
}

impl FixKind {
    /// Structural fixes first; attribute-level fixes rely on the head/body
    /// boundaries they establish.
    pub const ORDER: [FixKind; 6] = [
        Self::InsertDoctype,
        Self::InsertCharset,
        Self::InsertViewport,
        Self::InsertLang,
        Self::LazyLoadImages,
        Self::SecureTargetBlank,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InsertDoctype => "insert-doctype",
            Self::InsertCharset => "insert-charset",
            Self::InsertViewport => "insert-viewport",
            Self::InsertLang => "insert-lang",
            Self::LazyLoadImages => "lazy-load-images",
            Self::SecureTargetBlank => "secure-target-blank",
        }
    }

    /// The rule this transform resolves.
    pub fn rule_id(&self) -> &'static str {
        use super::ids;
        match self {
            Self::InsertDoctype => ids::DOCTYPE,
            Self::InsertCharset => ids::CHARSET,
            Self::InsertViewport => ids::VIEWPORT,
            Self::InsertLang => ids::HTML_LANG,
            Self::LazyLoadImages => ids::IMG_LAZY_LOADING,
            Self::SecureTargetBlank => ids::TARGET_BLANK,
        }
    }
}

impl fmt::Display for FixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMeta {
    pub id: &'static str,
    pub category: Category,
    pub severity: Severity,
    pub fix: Option<FixKind>,
    pub title: &'static str,
    /// Remediation hint shown next to every finding of this rule.
    pub suggestion: &'static str,
}

impl RuleMeta {
    pub fn fixable(&self) -> bool {
        self.fix.is_some()
    }
}

/// A single detected issue tied to one cataloged rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub rule_id: String,
    pub category: Category,
    pub severity_tier: SeverityTier,
    pub impact: Impact,
    pub severity_weight: u32,
    pub message: String,
    /// 1-based line in the markup, when the finding has a location there.
    pub line: Option<u32>,
    pub fixable: bool,
    pub suggestion: Option<String>,
}

impl Finding {
    pub fn new(meta: &RuleMeta, message: impl Into<String>, line: Option<u32>) -> Self {
        Self {
            rule_id: meta.id.to_string(),
            category: meta.category,
            severity_tier: meta.severity.tier,
            impact: meta.severity.impact,
            severity_weight: meta.severity.weight(),
            message: message.into(),
            line,
            fixable: meta.fixable(),
            suggestion: Some(meta.suggestion.to_string()).filter(|s| !s.is_empty()),
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::new(self.severity_tier, self.impact)
    }
}
