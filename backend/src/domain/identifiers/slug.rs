//! URL-safe slugs derived from display texts.
//!
//! A slug is a lowercase, hyphen-delimited ASCII token: one or more runs of
//! `[a-z0-9]` joined by single hyphens, with no leading or trailing hyphen.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::transliteration::{Transliterator, transliterate_best_effort};

/// Validation failures for caller-supplied slugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SlugValidationError {
    /// The slug is empty.
    #[error("slug must not be empty")]
    Empty,
    /// The slug contains characters or hyphen placement outside the format.
    #[error("slug may contain only lowercase latin letters, digits and single hyphens between them")]
    Malformed,
}

/// Validated slug.
///
/// # Examples
/// ```
/// use catalog_backend::domain::identifiers::Slug;
///
/// let slug = Slug::parse("running-shoes").expect("valid slug");
/// assert_eq!(slug.as_str(), "running-shoes");
/// assert!(Slug::parse("Running Shoes").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate `value` against the slug format.
    pub fn parse(value: &str) -> Result<Self, SlugValidationError> {
        if value.is_empty() {
            return Err(SlugValidationError::Empty);
        }
        if !is_valid_token(value, '-') {
            return Err(SlugValidationError::Malformed);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the slug text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Wrap a value already produced by the normaliser.
    pub(crate) fn from_normalised(value: String) -> Self {
        debug_assert!(is_valid_token(&value, '-'), "normaliser produced {value:?}");
        Self(value)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

/// Token derived from a display text by [`slugify_with`] or
/// [`tag_value_from_name_with`](super::tag_value_from_name_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedToken {
    /// Normalised token; empty when the input had no usable characters.
    pub text: String,
    /// True when transliteration failed and the raw input was normalised.
    pub fell_back: bool,
}

/// Derive a slug from `text` using the supplied transliterator.
///
/// The result satisfies the slug format or is empty.
pub fn slugify_with(transliterator: &dyn Transliterator, text: &str) -> DerivedToken {
    let ascii = transliterate_best_effort(transliterator, text);
    DerivedToken {
        text: normalise_token(ascii.text(), '-'),
        fell_back: ascii.fell_back(),
    }
}

/// Derive a slug from `text` with the default transliterator.
///
/// # Examples
/// ```
/// use catalog_backend::domain::identifiers::slugify;
///
/// assert_eq!(slugify("  Running Shoes!! 2024 "), "running-shoes-2024");
/// assert_eq!(slugify("Беговые кроссовки"), "begovye-krossovki");
/// assert_eq!(slugify("!!!"), "");
/// ```
pub fn slugify(text: &str) -> String {
    slugify_with(&super::DeunicodeTransliterator, text).text
}

/// Lowercase `text` and join its ASCII alphanumeric runs with `separator`.
///
/// Every other character acts as a boundary, so separators never repeat and
/// never lead or trail.
pub(crate) fn normalise_token(text: &str, separator: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_separator = false;
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push(separator);
            }
            pending_separator = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    out
}

/// Return `true` when `value` is non-empty runs of `[a-z0-9]` joined by
/// single `separator` characters.
pub(crate) fn is_valid_token(value: &str, separator: char) -> bool {
    !value.is_empty()
        && value
            .split(separator)
            .all(|run| !run.is_empty() && run.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit()))
}
