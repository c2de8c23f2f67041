//! ValidationResult: the serializable outcome of one validation run.

use serde::{Deserialize, Serialize};

use crate::catalog::{Finding, SeverityTier};
use crate::scoring::{Grade, Score};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub score: u32,
    pub grade: Grade,
    pub passed: bool,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub info: Vec<Finding>,
}

impl ValidationResult {
    /// Bucket already-ordered findings by tier.
    pub fn from_findings(findings: Vec<Finding>, score: Score) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut info = Vec::new();
        for finding in findings {
            match finding.severity_tier {
                SeverityTier::Error => errors.push(finding),
                SeverityTier::Warning => warnings.push(finding),
                SeverityTier::Info => info.push(finding),
            }
        }
        Self {
            score: score.score,
            grade: score.grade,
            passed: score.passed,
            errors,
            warnings,
            info,
        }
    }

    /// All findings: errors, then warnings, then info.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> + Clone {
        self.errors.iter().chain(&self.warnings).chain(&self.info)
    }

    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.info.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_rule(&self, rule_id: &str) -> bool {
        self.findings().any(|f| f.rule_id == rule_id)
    }

    pub fn count_rule(&self, rule_id: &str) -> usize {
        self.findings().filter(|f| f.rule_id == rule_id).count()
    }

    pub fn has_fixable(&self) -> bool {
        self.findings().any(|f| f.fixable)
    }

    pub fn has_auto_fail(&self) -> bool {
        self.errors.iter().any(|f| f.severity().is_auto_fail())
    }
}
