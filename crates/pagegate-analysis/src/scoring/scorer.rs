//! Score, grade and pass/fail from a finding list.

use std::fmt;

use serde::{Deserialize, Serialize};

use pagegate_core::config::ScoringConfig;
use pagegate_core::constants;

use crate::catalog::Finding;

/// Letter grade derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        f.write_str(s)
    }
}

/// Output of the scorer. `grade` and `passed` are independent signals: a
/// C can fail when a critical error is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub score: u32,
    pub grade: Grade,
    pub passed: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    pass_threshold: u32,
    /// Minimum scores for A, B, C, D.
    cutoffs: [u32; 4],
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            pass_threshold: constants::DEFAULT_PASS_THRESHOLD,
            cutoffs: [
                constants::DEFAULT_GRADE_A,
                constants::DEFAULT_GRADE_B,
                constants::DEFAULT_GRADE_C,
                constants::DEFAULT_GRADE_D,
            ],
        }
    }
}

impl Scorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            pass_threshold: config.effective_pass_threshold(),
            cutoffs: config.effective_grade_cutoffs(),
        }
    }

    pub fn pass_threshold(&self) -> u32 {
        self.pass_threshold
    }

    /// 100 minus every finding's weight, floored at 0. Every finding counts,
    /// including repeated critical errors.
    pub fn points<'a>(&self, findings: impl IntoIterator<Item = &'a Finding>) -> u32 {
        let deducted: u32 = findings
            .into_iter()
            .map(|f| f.severity().weight())
            .fold(0u32, u32::saturating_add);
        100u32.saturating_sub(deducted)
    }

    pub fn grade(&self, score: u32) -> Grade {
        let [a, b, c, d] = self.cutoffs;
        match score {
            s if s >= a => Grade::A,
            s if s >= b => Grade::B,
            s if s >= c => Grade::C,
            s if s >= d => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn score<'a>(&self, findings: impl IntoIterator<Item = &'a Finding> + Clone) -> Score {
        let auto_fail = findings
            .clone()
            .into_iter()
            .any(|f| f.severity().is_auto_fail());
        let score = self.points(findings);
        Score {
            score,
            grade: self.grade(score),
            passed: score >= self.pass_threshold && !auto_fail,
        }
    }
}
