//! Validated text primitives shared by the symcheck crates.
//!
//! - [`NonEmptyText`]: trimmed text with at least one non-whitespace character (condition names,
//!   advice, triage messages).
//! - [`SymptomToken`]: the canonical form of a symptom phrase used for every set comparison.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(NonEmptyText)` if the trimmed input is non-empty,
    /// or `Err(TextError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Canonical symptom token: trimmed, lowercase and non-empty.
///
/// Two phrases that differ only in letter case or surrounding whitespace produce equal tokens.
/// Synonym mapping is not applied here; that belongs to the normaliser in `symcheck-core`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymptomToken(String);

impl SymptomToken {
    /// Canonicalises `input` into a token.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if `input` is blank.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SymptomToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SymptomToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for SymptomToken {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for SymptomToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for SymptomToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SymptomToken::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Common Cold \n").expect("valid text");
        assert_eq!(text.as_str(), "Common Cold");
    }

    #[test]
    fn non_empty_text_rejects_whitespace() {
        let err = NonEmptyText::new(" \t ").expect_err("should reject blank");
        assert!(matches!(err, TextError::Empty));
    }

    #[test]
    fn symptom_token_is_case_and_whitespace_insensitive() {
        let a = SymptomToken::new("  Runny Nose ").expect("valid token");
        let b = SymptomToken::new("runny nose").expect("valid token");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "runny nose");
    }

    #[test]
    fn symptom_token_keeps_interior_spacing() {
        let token = SymptomToken::new("sore  throat").expect("valid token");
        assert_eq!(token.as_str(), "sore  throat");
    }

    #[test]
    fn symptom_token_rejects_blank() {
        assert!(matches!(SymptomToken::new(""), Err(TextError::Empty)));
    }

    #[test]
    fn symptom_token_deserialises_canonically() {
        let token: SymptomToken = serde_json::from_str("\" Fever \"").expect("deserialise");
        assert_eq!(token.as_str(), "fever");

        let err = serde_json::from_str::<SymptomToken>("\"   \"").expect_err("blank token");
        assert!(err.to_string().contains("Text cannot be empty"));
    }
}
