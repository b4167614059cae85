//! Knowledge base and rule set construction.
//!
//! A [`RuleSet`] is the immutable configuration the engine runs against: the ordered conditions,
//! the synonym table and the triage policy. It is built once (from the built-in rulebook or a
//! YAML file) and then shared behind an `Arc`.

use crate::clause::RequirementClause;
use crate::condition::Condition;
use crate::constants::BUILTIN_RULEBOOK_YAML;
use crate::normalizer::SynonymTable;
use crate::triage::{TriagePolicy, TriageRule};
use crate::{CoreConfig, CoreError, CoreResult};
use rulebook::{Rulebook, RulebookData};
use std::collections::HashSet;
use std::path::Path;

/// Conditions in declaration order. Names are unique.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    conditions: Vec<Condition>,
}

impl KnowledgeBase {
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateCondition` if two conditions share a name.
    pub fn new(conditions: Vec<Condition>) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for condition in &conditions {
            if !seen.insert(condition.name().as_str()) {
                return Err(CoreError::DuplicateCondition(condition.name().to_string()));
            }
        }
        Ok(Self { conditions })
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn get(&self, name: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.name().as_str() == name)
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Everything the engine needs besides its runtime knobs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub knowledge_base: KnowledgeBase,
    pub synonyms: SynonymTable,
    pub triage: TriagePolicy,
}

impl RuleSet {
    /// Translate parsed rulebook data, parsing every requirement clause once.
    pub fn from_data(data: RulebookData) -> CoreResult<Self> {
        let synonyms = SynonymTable::new(&data.synonyms)?;

        let triage = data
            .triage
            .into_iter()
            .map(TriageRule::from_data)
            .collect::<CoreResult<Vec<_>>>()?;

        let conditions = data
            .conditions
            .into_iter()
            .map(|condition| {
                let requirements = condition
                    .requires
                    .iter()
                    .map(|text| RequirementClause::parse(text))
                    .collect::<CoreResult<Vec<_>>>()?;
                Ok(Condition::new(condition.name, requirements, condition.advice))
            })
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(Self {
            knowledge_base: KnowledgeBase::new(conditions)?,
            synonyms,
            triage: TriagePolicy::new(triage),
        })
    }

    /// Parse a rulebook from YAML text.
    pub fn from_yaml(yaml_text: &str) -> CoreResult<Self> {
        Self::from_data(Rulebook::parse(yaml_text)?)
    }

    /// The rulebook compiled into the crate.
    pub fn builtin() -> CoreResult<Self> {
        Self::from_yaml(BUILTIN_RULEBOOK_YAML)
    }

    /// Load a rulebook file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let rules = Self::from_data(Rulebook::load(path)?)?;
        tracing::info!(
            path = %path.display(),
            conditions = rules.knowledge_base.len(),
            triage_rules = rules.triage.rules().len(),
            "loaded rulebook"
        );
        Ok(rules)
    }

    /// Load the rulebook named by `cfg`, or the built-in one when none is configured.
    pub fn resolve(cfg: &CoreConfig) -> CoreResult<Self> {
        match cfg.rulebook_path() {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::TriageLevel;
    use crate::SymptomSet;
    use symcheck_types::SymptomToken;

    #[test]
    fn builtin_rulebook_loads() {
        let rules = RuleSet::builtin().expect("built-in rulebook is valid");

        assert_eq!(rules.knowledge_base.len(), 9);
        assert_eq!(rules.triage.rules().len(), 3);
        assert!(!rules.synonyms.is_empty());

        let names: Vec<&str> = rules
            .knowledge_base
            .conditions()
            .iter()
            .map(|c| c.name().as_str())
            .collect();
        assert_eq!(names.first().copied(), Some("Common Cold"));
        assert_eq!(names.last().copied(), Some("Dehydration"));
    }

    #[test]
    fn builtin_clauses_are_typed() {
        let rules = RuleSet::builtin().expect("built-in rulebook is valid");
        let covid = rules
            .knowledge_base
            .get("COVID-like Illness")
            .expect("condition present");

        let token = |s: &str| SymptomToken::new(s).expect("valid token");
        assert_eq!(
            covid.requirements()[2],
            RequirementClause::AnyOf(vec![token("cough"), token("sore throat")])
        );
    }

    #[test]
    fn builtin_triage_order_is_emergency_first() {
        let rules = RuleSet::builtin().expect("built-in rulebook is valid");
        let set = SymptomSet::from_raw(
            ["chest pain", "persistent high fever", "cough"],
            &rules.synonyms,
        );
        assert_eq!(rules.triage.evaluate(&set).level, TriageLevel::Emergency);
    }

    #[test]
    fn rejects_ambiguous_clause_at_load_time() {
        let yaml = r#"conditions:
  - name: Mixed
    requires: [nausea or vomiting and diarrhea]
"#;
        let err = RuleSet::from_yaml(yaml).expect_err("should reject mixed clause");
        assert!(matches!(err, CoreError::AmbiguousClause(_)));
    }

    #[test]
    fn rejects_synonyms_that_collide_after_lowercasing() {
        let yaml = r#"synonyms:
  Stuffy Nose: congestion
  stuffy nose: sinus pain
conditions:
  - name: Cold
    requires: [congestion]
"#;
        let err = RuleSet::from_yaml(yaml).expect_err("should reject colliding synonyms");
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("duplicate synonym")));
    }

    #[test]
    fn rulebook_errors_are_wrapped() {
        let err = RuleSet::from_yaml("conditions: 3").expect_err("should reject schema");
        assert!(matches!(err, CoreError::Rulebook(_)));
    }

    #[test]
    fn knowledge_base_rejects_duplicate_names() {
        let condition = Condition::new(
            symcheck_types::NonEmptyText::new("Flu").expect("valid"),
            Vec::new(),
            String::new(),
        );
        let err = KnowledgeBase::new(vec![condition.clone(), condition])
            .expect_err("should reject duplicate");
        assert!(matches!(err, CoreError::DuplicateCondition(name) if name == "Flu"));
    }

    #[test]
    fn resolve_loads_configured_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("rules.yaml");
        std::fs::write(
            &path,
            "conditions:\n  - name: Only\n    requires: [a, b, c]\n",
        )
        .expect("write rules");

        let cfg = CoreConfig::new(70, 3, Some(path)).expect("valid config");
        let rules = RuleSet::resolve(&cfg).expect("load configured rules");
        assert_eq!(rules.knowledge_base.len(), 1);
        assert!(rules.triage.rules().is_empty());
    }

    #[test]
    fn resolve_defaults_to_builtin() {
        let rules = RuleSet::resolve(&CoreConfig::default()).expect("built-in rules");
        assert_eq!(rules, RuleSet::builtin().expect("built-in rules"));
    }
}
