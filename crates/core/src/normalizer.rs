//! Symptom normalisation.
//!
//! Raw phrases are lowercased and trimmed, then looked up once in the synonym table. Unknown
//! phrases pass through unchanged. Normalisation happens at ingress only; everything downstream
//! compares [`SymptomToken`]s.

use crate::{CoreError, CoreResult};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use symcheck_types::SymptomToken;

/// Phrase to canonical token mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SynonymTable {
    entries: HashMap<SymptomToken, SymptomToken>,
}

impl SynonymTable {
    /// Build a table from raw `(phrase, canonical)` pairs. Both sides are canonicalised.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Text` if either side of a pair is blank, and
    /// `CoreError::InvalidInput` if two phrases canonicalise to the same key but map to
    /// different tokens.
    pub fn new<I, K, V>(pairs: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entries: HashMap<SymptomToken, SymptomToken> = HashMap::new();
        for (phrase, canonical) in pairs {
            let phrase = SymptomToken::new(phrase)?;
            let canonical = SymptomToken::new(canonical)?;

            if let Some(existing) = entries.get(&phrase) {
                if *existing != canonical {
                    return Err(CoreError::InvalidInput(format!(
                        "duplicate synonym '{phrase}' maps to both '{existing}' and '{canonical}'"
                    )));
                }
                continue;
            }
            entries.insert(phrase, canonical);
        }
        Ok(Self { entries })
    }

    /// Normalise one raw phrase. Returns `None` for blank input.
    pub fn normalize(&self, raw: &str) -> Option<SymptomToken> {
        let token = SymptomToken::new(raw).ok()?;
        match self.entries.get(token.as_str()) {
            Some(canonical) => Some(canonical.clone()),
            None => Some(token),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Distinct normalised symptoms from one interaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymptomSet(BTreeSet<SymptomToken>);

impl SymptomSet {
    /// Normalise `raw` phrases through `synonyms`, dropping blanks and collapsing duplicates.
    pub fn from_raw<I, S>(raw: I, synonyms: &SynonymTable) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .filter_map(|phrase| synonyms.normalize(phrase.as_ref()))
            .collect()
    }

    pub fn contains(&self, token: &SymptomToken) -> bool {
        self.0.contains(token)
    }

    /// True if at least one of `tokens` is present.
    pub fn contains_any<'a, I>(&self, tokens: I) -> bool
    where
        I: IntoIterator<Item = &'a SymptomToken>,
    {
        tokens.into_iter().any(|t| self.0.contains(t))
    }

    /// True if every one of `tokens` is present.
    pub fn contains_all<'a, I>(&self, tokens: I) -> bool
    where
        I: IntoIterator<Item = &'a SymptomToken>,
    {
        tokens.into_iter().all(|t| self.0.contains(t))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<SymptomToken> for SymptomSet {
    fn from_iter<T: IntoIterator<Item = SymptomToken>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(s: &str) -> SymptomToken {
        SymptomToken::new(s).expect("valid token")
    }

    fn table() -> SynonymTable {
        SynonymTable::new([
            ("stuffy nose", "congestion"),
            ("Blocked Nose", "Congestion"),
            ("no cough", "no cough"),
        ])
        .expect("valid synonyms")
    }

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(table().normalize("  Sore Throat "), Some(token("sore throat")));
    }

    #[test]
    fn normalize_maps_synonyms() {
        let synonyms = table();
        assert_eq!(synonyms.normalize("Stuffy Nose"), Some(token("congestion")));
        assert_eq!(synonyms.normalize("blocked nose"), Some(token("congestion")));
        assert_eq!(synonyms.normalize("no cough"), Some(token("no cough")));
    }

    #[test]
    fn normalize_follows_a_single_hop_only() {
        let synonyms =
            SynonymTable::new([("a", "b"), ("b", "c")]).expect("valid synonyms");
        assert_eq!(synonyms.normalize("a"), Some(token("b")));
    }

    #[test]
    fn normalize_returns_none_for_blank() {
        assert_eq!(table().normalize("   "), None);
        assert_eq!(table().normalize(""), None);
    }

    #[test]
    fn synonym_table_rejects_blank_entries() {
        assert!(SynonymTable::new([("", "congestion")]).is_err());
        assert!(SynonymTable::new([("stuffy nose", " ")]).is_err());
    }

    #[test]
    fn synonym_table_rejects_conflicting_keys_after_canonicalisation() {
        let err = SynonymTable::new([("Stuffy Nose", "congestion"), (" stuffy nose", "sinus pain")])
            .expect_err("conflicting synonyms");
        assert!(
            matches!(&err, CoreError::InvalidInput(msg) if msg.contains("stuffy nose") && msg.contains("sinus pain")),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn synonym_table_accepts_repeated_identical_mapping() {
        let synonyms = SynonymTable::new([("Stuffy Nose", "congestion"), ("stuffy nose", "Congestion")])
            .expect("same mapping twice");
        assert_eq!(synonyms.len(), 1);
    }

    #[test]
    fn symptom_set_collapses_duplicates_and_synonyms() {
        let set = SymptomSet::from_raw(
            ["congestion", "Stuffy nose", " CONGESTION ", "", "fever"],
            &table(),
        );
        assert_eq!(set.len(), 2);
        assert!(set.contains(&token("congestion")));
        assert!(set.contains(&token("fever")));
    }

    #[test]
    fn symptom_set_membership_helpers() {
        let set: SymptomSet = [token("fever"), token("cough")].into_iter().collect();
        assert!(set.contains_any(&[token("rash"), token("cough")]));
        assert!(!set.contains_any(&[token("rash")]));
        assert!(set.contains_all(&[token("fever"), token("cough")]));
        assert!(!set.contains_all(&[token("fever"), token("rash")]));
    }

    #[test]
    fn symptom_set_serialises_sorted() {
        let set = SymptomSet::from_raw(["sneezing", "fever", "cough"], &table());
        let json = serde_json::to_string(&set).expect("serialise");
        assert_eq!(json, r#"["cough","fever","sneezing"]"#);
    }
}
