//! Error handling for pagegate.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod catalog_error;
pub mod config_error;
pub mod error_code;
pub mod fix_error;
pub mod report_error;
pub mod rule_error;

pub use catalog_error::CatalogError;
pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use fix_error::FixError;
pub use report_error::ReportError;
pub use rule_error::RuleError;
