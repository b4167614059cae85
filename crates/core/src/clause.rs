//! Requirement clauses and the clause matcher.
//!
//! A clause is parsed once, when the knowledge base is built, from text such as `"fever"`,
//! `"cough or sore throat"` or `"rash and fever"`. Matching then works on the typed variants.

use crate::normalizer::SymptomSet;
use crate::{CoreError, CoreResult};
use symcheck_types::SymptomToken;

const OR_SEPARATOR: &str = " or ";
const AND_SEPARATOR: &str = " and ";

/// One requirement of a condition.
///
/// `AnyOf` and `AllOf` always hold at least two distinct tokens; smaller groups are
/// represented as `Single`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequirementClause {
    Single(SymptomToken),
    AnyOf(Vec<SymptomToken>),
    AllOf(Vec<SymptomToken>),
}

/// Result of checking one clause against a symptom set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClauseOutcome {
    Satisfied,
    /// Human-readable description of what is missing.
    Missing(String),
}

impl RequirementClause {
    /// Parse clause text.
    ///
    /// The text is canonicalised (trimmed, lowercased), then classified by the literal
    /// separator `" or "`, then `" and "`, falling back to a single symptom.
    ///
    /// # Errors
    ///
    /// - `CoreError::AmbiguousClause` if the text contains both separators.
    /// - `CoreError::InvalidClause` if the text or one of its parts is blank.
    pub fn parse(text: &str) -> CoreResult<Self> {
        let canonical = SymptomToken::new(text).map_err(|_| CoreError::InvalidClause {
            clause: text.to_owned(),
            reason: "clause text is blank".into(),
        })?;
        let clause = canonical.as_str();

        let has_or = clause.contains(OR_SEPARATOR);
        let has_and = clause.contains(AND_SEPARATOR);

        match (has_or, has_and) {
            (true, true) => Err(CoreError::AmbiguousClause(clause.to_owned())),
            (true, false) => Self::any_of(split_parts(clause, OR_SEPARATOR)?),
            (false, true) => Self::all_of(split_parts(clause, AND_SEPARATOR)?),
            (false, false) => Ok(Self::Single(canonical)),
        }
    }

    /// Build a disjunctive clause. Duplicates are dropped (first occurrence wins) and a
    /// single remaining token collapses to `Single`.
    pub fn any_of(tokens: Vec<SymptomToken>) -> CoreResult<Self> {
        group(tokens, Self::AnyOf)
    }

    /// Build a conjunctive clause, with the same collapsing rules as [`Self::any_of`].
    pub fn all_of(tokens: Vec<SymptomToken>) -> CoreResult<Self> {
        group(tokens, Self::AllOf)
    }

    /// Check this clause against `symptoms`.
    pub fn evaluate(&self, symptoms: &SymptomSet) -> ClauseOutcome {
        match self {
            Self::Single(token) => {
                if symptoms.contains(token) {
                    ClauseOutcome::Satisfied
                } else {
                    ClauseOutcome::Missing(token.to_string())
                }
            }
            Self::AnyOf(options) => {
                if symptoms.contains_any(options) {
                    ClauseOutcome::Satisfied
                } else {
                    ClauseOutcome::Missing(format!("one of ({})", join(options.iter(), " / ")))
                }
            }
            Self::AllOf(parts) => {
                let absent: Vec<&SymptomToken> =
                    parts.iter().filter(|p| !symptoms.contains(p)).collect();
                if absent.is_empty() {
                    ClauseOutcome::Satisfied
                } else {
                    ClauseOutcome::Missing(join(absent.into_iter(), " + "))
                }
            }
        }
    }
}

impl std::fmt::Display for RequirementClause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(token) => write!(f, "{token}"),
            Self::AnyOf(tokens) => f.write_str(&join(tokens.iter(), OR_SEPARATOR)),
            Self::AllOf(tokens) => f.write_str(&join(tokens.iter(), AND_SEPARATOR)),
        }
    }
}

fn split_parts(clause: &str, separator: &str) -> CoreResult<Vec<SymptomToken>> {
    clause
        .split(separator)
        .map(|part| {
            SymptomToken::new(part).map_err(|_| CoreError::InvalidClause {
                clause: clause.to_owned(),
                reason: format!("empty alternative around '{}'", separator.trim()),
            })
        })
        .collect()
}

fn group(
    tokens: Vec<SymptomToken>,
    build: fn(Vec<SymptomToken>) -> RequirementClause,
) -> CoreResult<RequirementClause> {
    let mut distinct: Vec<SymptomToken> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if !distinct.contains(&token) {
            distinct.push(token);
        }
    }

    match distinct.len() {
        0 => Err(CoreError::InvalidClause {
            clause: String::new(),
            reason: "a clause group needs at least one symptom".into(),
        }),
        1 => Ok(RequirementClause::Single(distinct.remove(0))),
        _ => Ok(build(distinct)),
    }
}

fn join<'a>(tokens: impl Iterator<Item = &'a SymptomToken>, separator: &str) -> String {
    tokens
        .map(SymptomToken::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}
