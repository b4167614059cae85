//! Recommendation aggregator.
//!
//! [`SymptomChecker::recommend`] runs the whole pipeline for one interaction:
//! normalise, check the minimum symptom count, triage, score every condition in knowledge-base
//! order, then assemble the output lines. It never fails; every input maps to guidance text.

use crate::condition::{MatchResult, MatchStatus};
use crate::constants::{NO_MATCH_MESSAGE, SEPARATOR_WIDTH};
use crate::knowledge::RuleSet;
use crate::normalizer::SymptomSet;
use crate::triage::TriageLevel;
use crate::CoreConfig;
use serde::Serialize;
use std::sync::Arc;

/// One condition that reached the partial-match threshold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub condition: String,
    pub status: MatchStatus,
    #[serde(flatten)]
    pub result: MatchResult,
    pub advice: String,
}

/// Which terminal state the assessment reached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    InsufficientSymptoms { required: usize },
    Emergency { message: String },
    Assessed {
        triage: TriageLevel,
        findings: Vec<Finding>,
    },
}

/// Output of one `recommend` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub symptoms: SymptomSet,
    pub outcome: Outcome,
    pub lines: Vec<String>,
}

impl Recommendation {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// The symptom-matching engine. Cheap to clone and safe to share across threads.
#[derive(Clone, Debug)]
pub struct SymptomChecker {
    cfg: Arc<CoreConfig>,
    rules: Arc<RuleSet>,
}

impl SymptomChecker {
    pub fn new(cfg: Arc<CoreConfig>, rules: Arc<RuleSet>) -> Self {
        Self { cfg, rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Assess a list of raw symptom phrases.
    pub fn recommend<S: AsRef<str>>(&self, raw_symptoms: &[S]) -> Recommendation {
        let symptoms = SymptomSet::from_raw(raw_symptoms, &self.rules.synonyms);
        tracing::debug!(
            raw = raw_symptoms.len(),
            distinct = symptoms.len(),
            "normalised symptoms"
        );

        let required = self.cfg.min_distinct_symptoms();
        if symptoms.len() < required {
            return Recommendation {
                symptoms,
                outcome: Outcome::InsufficientSymptoms { required },
                lines: vec![insufficient_message(required)],
            };
        }

        let triage = self.rules.triage.evaluate(&symptoms);
        if triage.level == TriageLevel::Emergency {
            tracing::warn!(triage_message = %triage.message, "emergency triage outcome");
            return Recommendation {
                symptoms,
                lines: vec![triage.message.clone()],
                outcome: Outcome::Emergency {
                    message: triage.message,
                },
            };
        }

        let findings = self.assess(&symptoms);

        let mut lines = Vec::with_capacity(findings.len() + 2);
        if triage.level == TriageLevel::Urgent {
            lines.push(triage.message);
            lines.push("-".repeat(SEPARATOR_WIDTH));
        }
        if findings.is_empty() {
            lines.push(NO_MATCH_MESSAGE.to_string());
        } else {
            lines.extend(findings.iter().map(render_finding));
        }

        Recommendation {
            symptoms,
            outcome: Outcome::Assessed {
                triage: triage.level,
                findings,
            },
            lines,
        }
    }

    /// Score every condition and keep those at or above the partial threshold, in
    /// knowledge-base order.
    pub fn assess(&self, symptoms: &SymptomSet) -> Vec<Finding> {
        let threshold = self.cfg.partial_threshold_percent();

        self.rules
            .knowledge_base
            .conditions()
            .iter()
            .filter_map(|condition| {
                let result = condition.score(symptoms);
                let status = result.status(threshold);
                tracing::debug!(
                    condition = %condition.name(),
                    matched = result.matched,
                    total = result.total,
                    ?status,
                    "scored condition"
                );

                match status {
                    MatchStatus::Below => None,
                    MatchStatus::Exact | MatchStatus::Partial => Some(Finding {
                        condition: condition.name().to_string(),
                        status,
                        result,
                        advice: condition.advice().to_string(),
                    }),
                }
            })
            .collect()
    }
}

fn render_finding(finding: &Finding) -> String {
    match finding.status {
        MatchStatus::Exact => format!(
            "You may have: {}! (All key features matched)\nAdvice: {}",
            finding.condition, finding.advice
        ),
        _ => format!(
            "You are showing many features of: {}. Missing: {}.\nAdvice: {}",
            finding.condition,
            finding.result.missing.join(", "),
            finding.advice
        ),
    }
}

fn insufficient_message(required: usize) -> String {
    let count = match required {
        1 => "one".to_string(),
        2 => "two".to_string(),
        3 => "three".to_string(),
        4 => "four".to_string(),
        5 => "five".to_string(),
        n => n.to_string(),
    };
    let noun = if required == 1 { "symptom" } else { "symptoms" };
    format!("Please add more {noun} (at least {count}) for better suggestions.")
}
