//! # symcheck core
//!
//! Rule-based symptom matching for the symcheck tools.
//!
//! This crate contains the pure decision logic:
//! - Symptom normalisation through a synonym table
//! - Red-flag triage that can override any suggestion
//! - Requirement clauses (`x`, `x or y`, `x and y`) scored per condition
//! - Aggregation into ordered, human-readable guidance lines
//!
//! **No I/O in the request path**: rule files are read once at startup by [`RuleSet::load`],
//! and the interactive shell and CLI live in their own crates.

pub mod checker;
pub mod clause;
pub mod condition;
pub mod config;
pub mod constants;
pub mod error;
pub mod knowledge;
pub mod normalizer;
pub mod triage;

pub use checker::{Finding, Outcome, Recommendation, SymptomChecker};
pub use clause::{ClauseOutcome, RequirementClause};
pub use condition::{Condition, MatchResult, MatchStatus};
pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use knowledge::{KnowledgeBase, RuleSet};
pub use normalizer::{SymptomSet, SynonymTable};
pub use triage::{Signal, TriageLevel, TriageOutcome, TriagePolicy, TriageRule};

pub use symcheck_types::{NonEmptyText, SymptomToken};
