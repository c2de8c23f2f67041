//! # pagegate-analysis
//!
//! Validation and auto-fix engine for generated markup.
//! Parses a best-effort [`DocumentModel`], runs the [`RuleCatalog`] through
//! the [`ValidationEngine`], scores the findings, and repairs the safe subset
//! with the [`AutoFixEngine`].

pub mod autofix;
pub mod catalog;
pub mod document;
mod fault;
pub mod pipeline;
pub mod reporters;
pub mod scoring;
pub mod validation;

pub use autofix::{AboveFoldClassifier, AutoFixEngine, AutoFixResult};
pub use catalog::{Category, Finding, FixKind, Rule, RuleCatalog, RuleContext, Severity, SeverityTier};
pub use document::DocumentModel;
pub use pipeline::{PipelineReport, QualityPipeline};
pub use scoring::{Grade, Score, Scorer};
pub use validation::{ValidationEngine, ValidationResult};
