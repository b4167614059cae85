//! Conditions and the condition scorer.

use crate::clause::{ClauseOutcome, RequirementClause};
use crate::normalizer::SymptomSet;
use serde::Serialize;
use symcheck_types::NonEmptyText;

/// A named condition with its ordered requirement clauses and advice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Condition {
    name: NonEmptyText,
    requirements: Vec<RequirementClause>,
    advice: String,
}

/// How well a condition matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Every clause satisfied.
    Exact,
    /// At or above the partial threshold but not every clause.
    Partial,
    Below,
}

/// Per-condition scoring output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub matched: usize,
    pub total: usize,
    /// Missing descriptions in clause declaration order.
    pub missing: Vec<String>,
}

impl Condition {
    pub fn new(name: NonEmptyText, requirements: Vec<RequirementClause>, advice: String) -> Self {
        Self {
            name,
            requirements,
            advice,
        }
    }

    pub fn name(&self) -> &NonEmptyText {
        &self.name
    }

    pub fn requirements(&self) -> &[RequirementClause] {
        &self.requirements
    }

    pub fn advice(&self) -> &str {
        &self.advice
    }

    /// Score this condition against `symptoms`.
    pub fn score(&self, symptoms: &SymptomSet) -> MatchResult {
        let mut matched = 0;
        let mut missing = Vec::new();

        for clause in &self.requirements {
            match clause.evaluate(symptoms) {
                ClauseOutcome::Satisfied => matched += 1,
                ClauseOutcome::Missing(description) => missing.push(description),
            }
        }

        MatchResult {
            matched,
            total: self.requirements.len(),
            missing,
        }
    }
}

impl MatchResult {
    /// `matched / total`, or 0 for a condition without requirements.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.matched as f64 / self.total as f64
    }

    pub fn is_exact(&self) -> bool {
        self.total > 0 && self.matched == self.total
    }

    /// Classify against a whole-percent threshold.
    ///
    /// The comparison is done on integers (`matched * 100 >= percent * total`) so a ratio that
    /// sits exactly on the threshold is always included.
    pub fn status(&self, threshold_percent: u8) -> MatchStatus {
        if self.total == 0 {
            return MatchStatus::Below;
        }
        if self.is_exact() {
            return MatchStatus::Exact;
        }
        if self.matched * 100 >= usize::from(threshold_percent) * self.total {
            MatchStatus::Partial
        } else {
            MatchStatus::Below
        }
    }
}
