//! Scoring engine.

pub mod scorer;

pub use scorer::{Grade, Score, Scorer};
