//! Scoring configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Pass threshold and grade cut-offs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Minimum score to pass. Default: 70.
    pub pass_threshold: Option<u32>,
    /// Minimum score for an A. Default: 90.
    pub grade_a: Option<u32>,
    /// Minimum score for a B. Default: 80.
    pub grade_b: Option<u32>,
    /// Minimum score for a C. Default: 70.
    pub grade_c: Option<u32>,
    /// Minimum score for a D. Default: 60.
    pub grade_d: Option<u32>,
}

impl ScoringConfig {
    pub fn effective_pass_threshold(&self) -> u32 {
        self.pass_threshold.unwrap_or(constants::DEFAULT_PASS_THRESHOLD)
    }

    /// Returns the effective `[A, B, C, D]` cut-offs.
    pub fn effective_grade_cutoffs(&self) -> [u32; 4] {
        [
            self.grade_a.unwrap_or(constants::DEFAULT_GRADE_A),
            self.grade_b.unwrap_or(constants::DEFAULT_GRADE_B),
            self.grade_c.unwrap_or(constants::DEFAULT_GRADE_C),
            self.grade_d.unwrap_or(constants::DEFAULT_GRADE_D),
        ]
    }
}
