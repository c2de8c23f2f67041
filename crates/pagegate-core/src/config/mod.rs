//! Configuration system for pagegate.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod autofix_config;
pub mod pagegate_config;
pub mod rules_config;
pub mod scoring_config;

pub use autofix_config::AutoFixConfig;
pub use pagegate_config::{ConfigOverrides, PagegateConfig};
pub use rules_config::RulesConfig;
pub use scoring_config::ScoringConfig;
