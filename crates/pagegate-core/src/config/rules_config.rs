//! Rule selection and rule-specific tuning.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RulesConfig {
    /// Rule ids to skip entirely.
    #[serde(default)]
    pub disabled: Vec<String>,
    /// External scripts tolerated before warning. Default: 10.
    pub max_external_scripts: Option<usize>,
    /// Additional regexes for the hardcoded-secret rule.
    #[serde(default)]
    pub extra_secret_patterns: Vec<String>,
}

impl RulesConfig {
    pub fn effective_max_external_scripts(&self) -> usize {
        self.max_external_scripts
            .unwrap_or(constants::DEFAULT_MAX_EXTERNAL_SCRIPTS)
    }

    pub fn is_disabled(&self, rule_id: &str) -> bool {
        self.disabled.iter().any(|d| d == rule_id)
    }
}
