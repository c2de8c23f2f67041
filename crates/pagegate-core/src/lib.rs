//! pagegate-core: errors, configuration, tracing, and shared constants for
//! the pagegate markup quality engine.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;

pub use config::PagegateConfig;
pub use errors::ErrorCode;
