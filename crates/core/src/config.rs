//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into [`crate::SymptomChecker`]. Environment variables are only ever turned into a
//! `CoreConfig` by the binaries; nothing in the engine reads them while handling a request.

use crate::constants::{DEFAULT_MIN_DISTINCT_SYMPTOMS, DEFAULT_PARTIAL_THRESHOLD_PERCENT};
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    partial_threshold_percent: u8,
    min_distinct_symptoms: usize,
    rulebook_path: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidThreshold` if the threshold is above 100, and
    /// `CoreError::InvalidInput` if `min_distinct_symptoms` is zero.
    pub fn new(
        partial_threshold_percent: u8,
        min_distinct_symptoms: usize,
        rulebook_path: Option<PathBuf>,
    ) -> CoreResult<Self> {
        if partial_threshold_percent > 100 {
            return Err(CoreError::InvalidThreshold(format!(
                "{partial_threshold_percent} is above 100 percent"
            )));
        }

        if min_distinct_symptoms == 0 {
            return Err(CoreError::InvalidInput(
                "min_distinct_symptoms must be at least 1".into(),
            ));
        }

        Ok(Self {
            partial_threshold_percent,
            min_distinct_symptoms,
            rulebook_path,
        })
    }

    pub fn partial_threshold_percent(&self) -> u8 {
        self.partial_threshold_percent
    }

    pub fn min_distinct_symptoms(&self) -> usize {
        self.min_distinct_symptoms
    }

    /// Rulebook file to load, or `None` for the built-in rulebook.
    pub fn rulebook_path(&self) -> Option<&Path> {
        self.rulebook_path.as_deref()
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            partial_threshold_percent: DEFAULT_PARTIAL_THRESHOLD_PERCENT,
            min_distinct_symptoms: DEFAULT_MIN_DISTINCT_SYMPTOMS,
            rulebook_path: None,
        }
    }
}

/// Parse the partial-match threshold from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default threshold.
pub fn threshold_from_env_value(value: Option<String>) -> CoreResult<u8> {
    match non_blank(value) {
        None => Ok(DEFAULT_PARTIAL_THRESHOLD_PERCENT),
        Some(v) => {
            let parsed = v.parse::<u8>().map_err(|_| {
                CoreError::InvalidThreshold(format!("'{v}' is not a whole percentage"))
            })?;
            if parsed > 100 {
                return Err(CoreError::InvalidThreshold(format!(
                    "{parsed} is above 100 percent"
                )));
            }
            Ok(parsed)
        }
    }
}

/// Parse the minimum distinct symptom count from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default count.
pub fn min_symptoms_from_env_value(value: Option<String>) -> CoreResult<usize> {
    match non_blank(value) {
        None => Ok(DEFAULT_MIN_DISTINCT_SYMPTOMS),
        Some(v) => match v.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(CoreError::InvalidInput(format!(
                "minimum symptom count must be a positive integer, got '{v}'"
            ))),
        },
    }
}

/// Resolve an optional rulebook path. Blank values mean "use the built-in rulebook".
pub fn rulebook_path_from_env_value(value: Option<String>) -> Option<PathBuf> {
    non_blank(value).map(PathBuf::from)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_constants() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.partial_threshold_percent(), 70);
        assert_eq!(cfg.min_distinct_symptoms(), 3);
        assert!(cfg.rulebook_path().is_none());
    }

    #[test]
    fn new_rejects_threshold_above_100() {
        let err = CoreConfig::new(101, 3, None).expect_err("should reject threshold");
        assert!(matches!(err, CoreError::InvalidThreshold(_)));
    }

    #[test]
    fn new_rejects_zero_minimum() {
        let err = CoreConfig::new(70, 0, None).expect_err("should reject zero minimum");
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("at least 1")));
    }

    #[test]
    fn new_keeps_rulebook_path() {
        let cfg = CoreConfig::new(80, 2, Some(PathBuf::from("rules.yaml"))).expect("valid");
        assert_eq!(cfg.rulebook_path(), Some(Path::new("rules.yaml")));
    }

    #[test]
    fn threshold_env_value_defaults_when_blank() {
        assert_eq!(threshold_from_env_value(None).expect("default"), 70);
        assert_eq!(threshold_from_env_value(Some("  ".into())).expect("default"), 70);
    }

    #[test]
    fn threshold_env_value_parses_percentages() {
        assert_eq!(threshold_from_env_value(Some(" 85 ".into())).expect("parse"), 85);
        assert_eq!(threshold_from_env_value(Some("100".into())).expect("parse"), 100);
    }

    #[test]
    fn threshold_env_value_rejects_garbage() {
        assert!(matches!(
            threshold_from_env_value(Some("0.7".into())),
            Err(CoreError::InvalidThreshold(_))
        ));
        assert!(matches!(
            threshold_from_env_value(Some("150".into())),
            Err(CoreError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn min_symptoms_env_value_validates() {
        assert_eq!(min_symptoms_from_env_value(None).expect("default"), 3);
        assert_eq!(min_symptoms_from_env_value(Some("5".into())).expect("parse"), 5);
        assert!(min_symptoms_from_env_value(Some("0".into())).is_err());
        assert!(min_symptoms_from_env_value(Some("-1".into())).is_err());
    }

    #[test]
    fn rulebook_path_env_value_ignores_blank() {
        assert_eq!(rulebook_path_from_env_value(Some(" ".into())), None);
        assert_eq!(
            rulebook_path_from_env_value(Some("/etc/symcheck/rules.yaml".into())),
            Some(PathBuf::from("/etc/symcheck/rules.yaml"))
        );
    }
}
