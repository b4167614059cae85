//! Constants used throughout the symcheck core crate.
//!
//! Fixed guidance messages, defaults and environment variable names live here so the engine,
//! the shell and the CLI stay consistent.

/// Default partial-match threshold, as a whole percentage of satisfied clauses.
pub const DEFAULT_PARTIAL_THRESHOLD_PERCENT: u8 = 70;

/// Default minimum number of distinct normalised symptoms before any assessment runs.
pub const DEFAULT_MIN_DISTINCT_SYMPTOMS: usize = 3;

/// Width of the `-` rule printed between an urgent warning and the suggestions.
pub const SEPARATOR_WIDTH: usize = 50;

/// Returned when no condition reaches the partial-match threshold.
pub const NO_MATCH_MESSAGE: &str = "No strong rule-based matches. Consider rest, fluids, and monitoring.\nSeek care if symptoms worsen, high fever lasts >3 days, breathing trouble, or red flags appear.";

/// The rulebook used when no rulebook file is configured.
pub const BUILTIN_RULEBOOK_YAML: &str = include_str!("../rules/default.yaml");

/// Environment variable naming a rulebook YAML file.
pub const RULES_FILE_ENV: &str = "SYMCHECK_RULES_FILE";

/// Environment variable overriding the partial-match threshold (whole percent).
pub const PARTIAL_THRESHOLD_ENV: &str = "SYMCHECK_PARTIAL_THRESHOLD";

/// Environment variable overriding the minimum distinct symptom count.
pub const MIN_SYMPTOMS_ENV: &str = "SYMCHECK_MIN_SYMPTOMS";
