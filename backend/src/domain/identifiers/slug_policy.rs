//! Update-time slug policy.
//!
//! | explicit slug | text changed | action                 |
//! |---------------|--------------|------------------------|
//! | provided      | any          | use the explicit slug  |
//! | absent        | yes          | regenerate from text   |
//! | absent        | no           | keep the current slug  |
//!
//! An explicit empty slug counts as absent, as does a missing new text.

use super::slug::Slug;

/// Decision for the slug of an entity being updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugChange {
    /// Use the caller-supplied slug verbatim.
    Explicit(Slug),
    /// Derive a fresh slug from the contained text.
    Regenerate(String),
    /// Leave the stored slug untouched.
    Keep,
}

/// Normalise a raw caller-supplied slug field.
///
/// `None` and `Some("")` both mean "no override"; any other value must be a
/// valid slug.
pub fn explicit_slug(raw: Option<&str>) -> Result<Option<Slug>, super::SlugValidationError> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => Slug::parse(value).map(Some),
    }
}

/// Decide how the slug changes on update.
///
/// # Examples
/// ```
/// use catalog_backend::domain::identifiers::{plan_slug_update, SlugChange};
///
/// let change = plan_slug_update(None, Some("Trail shoes"), "Road shoes");
/// assert_eq!(change, SlugChange::Regenerate("Trail shoes".to_owned()));
/// assert_eq!(plan_slug_update(None, Some("Road shoes"), "Road shoes"), SlugChange::Keep);
/// ```
pub fn plan_slug_update(
    explicit: Option<Slug>,
    new_text: Option<&str>,
    current_text: &str,
) -> SlugChange {
    if let Some(slug) = explicit {
        return SlugChange::Explicit(slug);
    }
    match new_text {
        Some(text) if text != current_text => SlugChange::Regenerate(text.to_owned()),
        _ => SlugChange::Keep,
    }
}
