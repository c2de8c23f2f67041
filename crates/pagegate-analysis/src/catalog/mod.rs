//! Rule catalog: static rule metadata, the rule implementations, and the
//! immutable registry validation runs against.

pub mod ids;
pub mod meta;
pub mod registry;
pub mod rules;
pub mod types;

pub use registry::RuleCatalog;
pub use rules::{Rule, RuleContext};
pub use types::{Category, Finding, FixKind, Impact, RuleMeta, Severity, SeverityTier};
