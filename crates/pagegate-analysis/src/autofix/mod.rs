//! Auto-fix engine: ordered, pure transforms for the fixable rules.

pub mod above_fold;
pub mod edit;
pub mod engine;
pub mod transforms;

pub use above_fold::AboveFoldClassifier;
pub use engine::{AutoFixEngine, AutoFixResult};
pub use transforms::{FixContext, FixOutcome};
