//! Rulebook wire/boundary support.
//!
//! This crate provides **wire models** and **format/translation helpers** for the YAML rule files
//! that drive symptom matching:
//! - the synonym table (phrase to canonical symptom)
//! - ordered triage rules (red flags)
//! - ordered conditions with their requirement clause text and advice
//!
//! This crate focuses on:
//! - strict serialisation/deserialisation
//! - structural validation (required fields, unique condition names)
//! - translation between wire structs and plain domain carriers
//!
//! Clause grammar (`x or y`, `x and y`) is NOT interpreted here. `symcheck-core` turns the clause
//! text into typed requirement clauses when it builds its knowledge base.

pub mod document;

// Re-export facades
pub use document::Rulebook;

// Re-export public domain-level types
pub use document::{ConditionData, RulebookData, Severity, SignalData, TriageRuleData};

/// Errors returned by the `rulebook` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum RulebookError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("duplicate condition name: {0}")]
    DuplicateCondition(String),
}

/// Type alias for Results that can fail with a [`RulebookError`].
pub type RulebookResult<T> = Result<T, RulebookError>;
