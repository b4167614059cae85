//! Rulebook document wire models and translation helpers.
//!
//! Responsibilities:
//! - Define public domain-level carriers for synonyms, triage rules and conditions
//! - Define a strict wire model for serialisation/deserialisation
//! - Provide translation helpers between domain carriers and the wire model
//! - Validate rulebook structure and enforce required fields
//!
//! Notes:
//! - Condition and triage rule order is significant and preserved exactly as declared
//! - Requirement entries are kept as raw clause text

use crate::{RulebookError, RulebookResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use symcheck_types::NonEmptyText;

// ============================================================================
// Public domain-level types
// ============================================================================

/// Domain-level carrier for a whole rulebook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RulebookData {
    /// Phrase to canonical symptom mapping. Keys and values are raw text; the core normalises them.
    pub synonyms: BTreeMap<String, String>,

    /// Triage rules in evaluation order (first match wins).
    pub triage: Vec<TriageRuleData>,

    /// Conditions in declaration order.
    pub conditions: Vec<ConditionData>,
}

/// Severity of a triage rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Stop all further assessment and escalate immediately.
    Emergency,
    /// Warn, then continue with the normal assessment.
    Urgent,
}

/// The symptom signal a triage rule fires on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignalData {
    /// Fires when any listed symptom is present.
    AnyOf(Vec<String>),
    /// Fires only when every listed symptom is present.
    AllOf(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriageRuleData {
    pub level: Severity,
    pub signal: SignalData,
    pub message: NonEmptyText,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConditionData {
    pub name: NonEmptyText,
    /// Requirement clause text, e.g. `"fever"`, `"cough or sore throat"`.
    pub requires: Vec<String>,
    pub advice: String,
}

// ============================================================================
// Public Rulebook operations
// ============================================================================

/// Rulebook operations.
///
/// This is a zero-sized type used for namespacing rulebook-related operations.
/// All methods are associated functions.
pub struct Rulebook;

impl Rulebook {
    /// Parse a rulebook from YAML text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g. `conditions[2].name`)
    /// to the failing field when the YAML does not match the wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`RulebookError`] if:
    /// - the YAML does not match the wire schema (wrong types, unknown keys),
    /// - a condition name, triage message or signal entry is blank,
    /// - a triage rule declares both or neither of `any_of` / `all_of`,
    /// - two conditions share a name.
    pub fn parse(yaml_text: &str) -> RulebookResult<RulebookData> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, RulebookWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(RulebookError::Translation(format!(
                    "Rulebook schema mismatch at {path}: {source}"
                )));
            }
        };

        wire_to_domain(wire)
    }

    /// Render a rulebook as YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`RulebookError`] if serialisation fails.
    pub fn render(data: &RulebookData) -> RulebookResult<String> {
        let wire = domain_to_wire(data);
        serde_yaml::to_string(&wire)
            .map_err(|e| RulebookError::Translation(format!("Failed to serialize rulebook: {e}")))
    }

    /// Read and parse a rulebook file.
    pub fn load(path: &Path) -> RulebookResult<RulebookData> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct RulebookWire {
    #[serde(default)]
    pub synonyms: BTreeMap<String, String>,
    #[serde(default)]
    pub triage: Vec<TriageRuleWire>,
    pub conditions: Vec<ConditionWire>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct TriageRuleWire {
    pub level: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<String>>,
    pub message: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ConditionWire {
    pub name: String,
    pub requires: Vec<String>,
    #[serde(default)]
    pub advice: String,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: RulebookWire) -> RulebookResult<RulebookData> {
    let triage = wire
        .triage
        .into_iter()
        .enumerate()
        .map(|(index, rule)| triage_rule_to_domain(index, rule))
        .collect::<RulebookResult<Vec<_>>>()?;

    let mut seen = HashSet::new();
    let mut conditions = Vec::with_capacity(wire.conditions.len());
    for (index, condition) in wire.conditions.into_iter().enumerate() {
        let name = NonEmptyText::new(&condition.name).map_err(|_| {
            RulebookError::InvalidInput(format!("conditions[{index}].name cannot be empty"))
        })?;

        if !seen.insert(name.as_str().to_owned()) {
            return Err(RulebookError::DuplicateCondition(name.to_string()));
        }

        if condition.requires.iter().any(|req| req.trim().is_empty()) {
            return Err(RulebookError::InvalidInput(format!(
                "condition '{name}' has a blank requirement"
            )));
        }

        conditions.push(ConditionData {
            name,
            requires: condition.requires,
            advice: condition.advice.trim().to_owned(),
        });
    }

    Ok(RulebookData {
        synonyms: wire.synonyms,
        triage,
        conditions,
    })
}

fn triage_rule_to_domain(index: usize, wire: TriageRuleWire) -> RulebookResult<TriageRuleData> {
    let signal = match (wire.any_of, wire.all_of) {
        (Some(symptoms), None) => SignalData::AnyOf(symptoms),
        (None, Some(symptoms)) => SignalData::AllOf(symptoms),
        (Some(_), Some(_)) => {
            return Err(RulebookError::InvalidInput(format!(
                "triage[{index}] declares both any_of and all_of"
            )))
        }
        (None, None) => {
            return Err(RulebookError::InvalidInput(format!(
                "triage[{index}] must declare any_of or all_of"
            )))
        }
    };

    let symptoms = match &signal {
        SignalData::AnyOf(symptoms) | SignalData::AllOf(symptoms) => symptoms,
    };
    if symptoms.is_empty() || symptoms.iter().any(|s| s.trim().is_empty()) {
        return Err(RulebookError::InvalidInput(format!(
            "triage[{index}] signal list must contain non-blank symptoms"
        )));
    }

    let message = NonEmptyText::new(&wire.message).map_err(|_| {
        RulebookError::InvalidInput(format!("triage[{index}].message cannot be empty"))
    })?;

    Ok(TriageRuleData {
        level: wire.level,
        signal,
        message,
    })
}

fn domain_to_wire(data: &RulebookData) -> RulebookWire {
    RulebookWire {
        synonyms: data.synonyms.clone(),
        triage: data
            .triage
            .iter()
            .map(|rule| {
                let (any_of, all_of) = match &rule.signal {
                    SignalData::AnyOf(symptoms) => (Some(symptoms.clone()), None),
                    SignalData::AllOf(symptoms) => (None, Some(symptoms.clone())),
                };
                TriageRuleWire {
                    level: rule.level,
                    any_of,
                    all_of,
                    message: rule.message.to_string(),
                }
            })
            .collect(),
        conditions: data
            .conditions
            .iter()
            .map(|condition| ConditionWire {
                name: condition.name.to_string(),
                requires: condition.requires.clone(),
                advice: condition.advice.clone(),
            })
            .collect(),
    }
}
