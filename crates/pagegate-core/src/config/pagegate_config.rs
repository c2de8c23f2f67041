//! Top-level pagegate configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AutoFixConfig, RulesConfig, ScoringConfig};
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`PAGEGATE_*`)
/// 3. Project config (`pagegate.toml` in the project root)
/// 4. User config (`~/.pagegate/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PagegateConfig {
    pub scoring: ScoringConfig,
    pub autofix: AutoFixConfig,
    pub rules: RulesConfig,
}

/// Caller-supplied overrides (CLI flags, request options).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub pass_threshold: Option<u32>,
    pub above_fold_image_count: Option<usize>,
    pub default_lang: Option<String>,
    pub disabled_rules: Option<Vec<String>>,
}

impl PagegateConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // User config: parse errors are fatal, unreadable files are not.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(constants::CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;
        tracing::debug!(root = %root.display(), "pagegate config resolved");
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &PagegateConfig) -> Result<(), ConfigError> {
        if config.scoring.effective_pass_threshold() > 100 {
            return Err(ConfigError::ValidationFailed {
                field: "scoring.pass_threshold".to_string(),
                message: "must be between 0 and 100".to_string(),
            });
        }

        let cutoffs = config.scoring.effective_grade_cutoffs();
        if cutoffs.iter().any(|c| *c > 100) {
            return Err(ConfigError::ValidationFailed {
                field: "scoring.grade_*".to_string(),
                message: "must be between 0 and 100".to_string(),
            });
        }
        if cutoffs.windows(2).any(|w| w[0] < w[1]) {
            return Err(ConfigError::ValidationFailed {
                field: "scoring.grade_*".to_string(),
                message: "cut-offs must satisfy grade_a >= grade_b >= grade_c >= grade_d"
                    .to_string(),
            });
        }

        let ratio = config.autofix.effective_above_fold_ratio();
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ConfigError::ValidationFailed {
                field: "autofix.above_fold_ratio".to_string(),
                message: "must be between 0.0 and 1.0".to_string(),
            });
        }

        if config.autofix.effective_default_lang().trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "autofix.default_lang".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if config
            .autofix
            .above_fold_keywords
            .iter()
            .any(|k| k.trim().is_empty())
        {
            return Err(ConfigError::ValidationFailed {
                field: "autofix.above_fold_keywords".to_string(),
                message: "keywords must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.pagegate/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".pagegate").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut PagegateConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: PagegateConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it carries a value.
    fn merge(base: &mut PagegateConfig, other: &PagegateConfig) {
        // Scoring
        if other.scoring.pass_threshold.is_some() {
            base.scoring.pass_threshold = other.scoring.pass_threshold;
        }
        if other.scoring.grade_a.is_some() {
            base.scoring.grade_a = other.scoring.grade_a;
        }
        if other.scoring.grade_b.is_some() {
            base.scoring.grade_b = other.scoring.grade_b;
        }
        if other.scoring.grade_c.is_some() {
            base.scoring.grade_c = other.scoring.grade_c;
        }
        if other.scoring.grade_d.is_some() {
            base.scoring.grade_d = other.scoring.grade_d;
        }

        // Auto-fix
        if !other.autofix.above_fold_keywords.is_empty() {
            base.autofix.above_fold_keywords = other.autofix.above_fold_keywords.clone();
        }
        if other.autofix.above_fold_image_count.is_some() {
            base.autofix.above_fold_image_count = other.autofix.above_fold_image_count;
        }
        if other.autofix.above_fold_ratio.is_some() {
            base.autofix.above_fold_ratio = other.autofix.above_fold_ratio;
        }
        if other.autofix.default_lang.is_some() {
            base.autofix.default_lang = other.autofix.default_lang.clone();
        }

        // Rules
        if !other.rules.disabled.is_empty() {
            base.rules.disabled = other.rules.disabled.clone();
        }
        if other.rules.max_external_scripts.is_some() {
            base.rules.max_external_scripts = other.rules.max_external_scripts;
        }
        if !other.rules.extra_secret_patterns.is_empty() {
            base.rules.extra_secret_patterns = other.rules.extra_secret_patterns.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `PAGEGATE_PASS_THRESHOLD`, `PAGEGATE_DEFAULT_LANG`, etc.
    fn apply_env_overrides(config: &mut PagegateConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("PAGEGATE_PASS_THRESHOLD") {
            let v = val.parse::<u32>().map_err(|e| ConfigError::InvalidValue {
                field: "PAGEGATE_PASS_THRESHOLD".to_string(),
                message: e.to_string(),
            })?;
            config.scoring.pass_threshold = Some(v);
        }
        if let Ok(val) = std::env::var("PAGEGATE_ABOVE_FOLD_IMAGE_COUNT") {
            let v = val.parse::<usize>().map_err(|e| ConfigError::InvalidValue {
                field: "PAGEGATE_ABOVE_FOLD_IMAGE_COUNT".to_string(),
                message: e.to_string(),
            })?;
            config.autofix.above_fold_image_count = Some(v);
        }
        if let Ok(val) = std::env::var("PAGEGATE_DEFAULT_LANG") {
            config.autofix.default_lang = Some(val);
        }
        if let Ok(val) = std::env::var("PAGEGATE_DISABLED_RULES") {
            config.rules.disabled = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        Ok(())
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut PagegateConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.pass_threshold {
            config.scoring.pass_threshold = Some(v);
        }
        if let Some(v) = overrides.above_fold_image_count {
            config.autofix.above_fold_image_count = Some(v);
        }
        if let Some(ref v) = overrides.default_lang {
            config.autofix.default_lang = Some(v.clone());
        }
        if let Some(ref v) = overrides.disabled_rules {
            config.rules.disabled = v.clone();
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
