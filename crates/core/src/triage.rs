//! Red-flag triage policy.
//!
//! Rules are checked in declaration order and the first rule that fires decides the outcome.
//! An emergency outcome stops the assessment; an urgent one is shown ahead of the suggestions.

use crate::normalizer::SymptomSet;
use crate::CoreResult;
use rulebook::{Severity, SignalData, TriageRuleData};
use serde::Serialize;
use std::collections::BTreeSet;
use symcheck_types::{NonEmptyText, SymptomToken};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageLevel {
    Emergency,
    Urgent,
    Ok,
}

impl From<Severity> for TriageLevel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Emergency => TriageLevel::Emergency,
            Severity::Urgent => TriageLevel::Urgent,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    /// Any flagged symptom present.
    AnyOf(BTreeSet<SymptomToken>),
    /// The whole bundle present.
    AllOf(BTreeSet<SymptomToken>),
}

impl Signal {
    pub fn fires(&self, symptoms: &SymptomSet) -> bool {
        match self {
            Signal::AnyOf(flags) => symptoms.contains_any(flags),
            Signal::AllOf(bundle) => symptoms.contains_all(bundle),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriageRule {
    pub severity: Severity,
    pub signal: Signal,
    pub message: NonEmptyText,
}

impl TriageRule {
    pub fn from_data(data: TriageRuleData) -> CoreResult<Self> {
        let signal = match data.signal {
            SignalData::AnyOf(symptoms) => Signal::AnyOf(tokens(symptoms)?),
            SignalData::AllOf(symptoms) => Signal::AllOf(tokens(symptoms)?),
        };
        Ok(Self {
            severity: data.level,
            signal,
            message: data.message,
        })
    }
}

/// Level and message produced by the policy. The message is empty for `Ok`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TriageOutcome {
    pub level: TriageLevel,
    pub message: String,
}

impl TriageOutcome {
    fn ok() -> Self {
        Self {
            level: TriageLevel::Ok,
            message: String::new(),
        }
    }
}

/// Ordered triage rules.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TriagePolicy {
    rules: Vec<TriageRule>,
}

impl TriagePolicy {
    pub fn new(rules: Vec<TriageRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[TriageRule] {
        &self.rules
    }

    /// Evaluate the rules against `symptoms`; the first one that fires wins.
    pub fn evaluate(&self, symptoms: &SymptomSet) -> TriageOutcome {
        for rule in &self.rules {
            if rule.signal.fires(symptoms) {
                tracing::debug!(severity = ?rule.severity, triage_message = %rule.message, "triage rule fired");
                return TriageOutcome {
                    level: rule.severity.into(),
                    message: rule.message.to_string(),
                };
            }
        }
        TriageOutcome::ok()
    }
}

fn tokens(symptoms: Vec<String>) -> CoreResult<BTreeSet<SymptomToken>> {
    symptoms
        .into_iter()
        .map(|s| SymptomToken::new(s).map_err(Into::into))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(symptoms: &[&str]) -> SymptomSet {
        symptoms
            .iter()
            .map(|s| SymptomToken::new(s).expect("valid token"))
            .collect()
    }

    fn rule(severity: Severity, signal: SignalData, message: &str) -> TriageRule {
        TriageRule::from_data(TriageRuleData {
            level: severity,
            signal,
            message: NonEmptyText::new(message).expect("valid message"),
        })
        .expect("valid rule")
    }

    fn policy() -> TriagePolicy {
        TriagePolicy::new(vec![
            rule(
                Severity::Emergency,
                SignalData::AnyOf(vec!["chest pain".into(), "Bluish Lips".into()]),
                "emergency flags",
            ),
            rule(
                Severity::Emergency,
                SignalData::AllOf(vec![
                    "stiff neck".into(),
                    "fever".into(),
                    "severe headache".into(),
                ]),
                "meningitis bundle",
            ),
            rule(
                Severity::Urgent,
                SignalData::AnyOf(vec!["blood in stool".into()]),
                "urgent flags",
            ),
        ])
    }

    #[test]
    fn any_of_flag_is_emergency() {
        let outcome = policy().evaluate(&set(&["cough", "bluish lips", "fever"]));
        assert_eq!(outcome.level, TriageLevel::Emergency);
        assert_eq!(outcome.message, "emergency flags");
    }

    #[test]
    fn bundle_needs_every_symptom() {
        let partial = policy().evaluate(&set(&["stiff neck", "fever", "cough"]));
        assert_eq!(partial.level, TriageLevel::Ok);

        let full = policy().evaluate(&set(&["stiff neck", "fever", "severe headache"]));
        assert_eq!(full.level, TriageLevel::Emergency);
        assert_eq!(full.message, "meningitis bundle");
    }

    #[test]
    fn first_matching_rule_wins() {
        let outcome = policy().evaluate(&set(&[
            "stiff neck",
            "fever",
            "severe headache",
            "chest pain",
            "blood in stool",
        ]));
        assert_eq!(outcome.message, "emergency flags");
    }

    #[test]
    fn urgent_flag_is_urgent() {
        let outcome = policy().evaluate(&set(&["blood in stool", "diarrhea", "nausea"]));
        assert_eq!(outcome.level, TriageLevel::Urgent);
        assert_eq!(outcome.message, "urgent flags");
    }

    #[test]
    fn nothing_flagged_is_ok_with_empty_message() {
        let outcome = policy().evaluate(&set(&["runny nose", "sneezing", "congestion"]));
        assert_eq!(outcome.level, TriageLevel::Ok);
        assert!(outcome.message.is_empty());
    }

    #[test]
    fn empty_policy_is_always_ok() {
        let outcome = TriagePolicy::default().evaluate(&set(&["chest pain"]));
        assert_eq!(outcome.level, TriageLevel::Ok);
    }
}
