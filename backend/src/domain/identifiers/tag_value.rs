//! Machine-readable tag values derived from tag names.
//!
//! A tag value is a lowercase, underscore-delimited ASCII token. Tags are
//! looked up by value in public URLs (`/tags/value/{value}`), so the value is
//! unique across all tags.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::slug::{DerivedToken, is_valid_token, normalise_token};
use super::transliteration::{Transliterator, transliterate_best_effort};

/// Validation failures for caller-supplied tag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TagValueValidationError {
    /// The value is empty.
    #[error("tag value must not be empty")]
    Empty,
    /// The value contains characters or underscore placement outside the format.
    #[error(
        "tag value may contain only lowercase latin letters, digits and single underscores between them"
    )]
    Malformed,
}

/// Validated tag value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagValue(String);

impl TagValue {
    /// Validate `value` against the tag value format.
    pub fn parse(value: &str) -> Result<Self, TagValueValidationError> {
        if value.is_empty() {
            return Err(TagValueValidationError::Empty);
        }
        if !is_valid_token(value, '_') {
            return Err(TagValueValidationError::Malformed);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the value text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub(crate) fn from_normalised(value: String) -> Self {
        debug_assert!(is_valid_token(&value, '_'), "normaliser produced {value:?}");
        Self(value)
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TagValue {
    type Error = TagValueValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TagValue> for String {
    fn from(value: TagValue) -> Self {
        value.0
    }
}

/// Derive a tag value from `name` using the supplied transliterator.
pub fn tag_value_from_name_with(transliterator: &dyn Transliterator, name: &str) -> DerivedToken {
    let ascii = transliterate_best_effort(transliterator, name);
    DerivedToken {
        text: normalise_token(ascii.text(), '_'),
        fell_back: ascii.fell_back(),
    }
}

/// Derive a tag value from `name` with the default transliterator.
///
/// # Examples
/// ```
/// use catalog_backend::domain::identifiers::tag_value_from_name;
///
/// assert_eq!(tag_value_from_name("Беговые кроссовки"), "begovye_krossovki");
/// assert_eq!(tag_value_from_name("New -- Arrivals!"), "new_arrivals");
/// ```
pub fn tag_value_from_name(name: &str) -> String {
    tag_value_from_name_with(&super::DeunicodeTransliterator, name).text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identifiers::transliteration::{MockTransliterator, TransliterationError};
    use rstest::rstest;

    #[rstest]
    #[case("Беговые кроссовки", "begovye_krossovki")]
    #[case("Summer Sale 2024", "summer_sale_2024")]
    #[case("__hot__  deals__", "hot_deals")]
    #[case("Éco-Friendly", "eco_friendly")]
    #[case("???", "")]
    fn derives_underscore_tokens(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(tag_value_from_name(name), expected);
    }

    #[rstest]
    fn cyrillic_name_yields_non_empty_ascii_value() {
        let value = tag_value_from_name("Беговые кроссовки");
        assert!(!value.is_empty());
        assert!(TagValue::parse(&value).is_ok(), "bad value {value:?}");
    }

    #[rstest]
    fn falls_back_to_raw_name() {
        let mut failing = MockTransliterator::new();
        failing
            .expect_transliterate()
            .returning(|_| Err(TransliterationError::new("unavailable")));

        let derived = tag_value_from_name_with(&failing, "Хиты Top 10");

        assert!(derived.fell_back);
        assert_eq!(derived.text, "top_10");
    }

    #[rstest]
    #[case("running", true)]
    #[case("trail_running_2", true)]
    #[case("", false)]
    #[case("_running", false)]
    #[case("running_", false)]
    #[case("trail__running", false)]
    #[case("trail-running", false)]
    #[case("Running", false)]
    fn parse_enforces_format(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(TagValue::parse(input).is_ok(), valid, "input {input:?}");
    }
}
