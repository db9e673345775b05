//! Top-level catalogue categories.

use crate::domain::identifiers::Slug;

use super::{DisplayText, ImageUrl};

/// Stored category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub text: DisplayText,
    pub slug: Slug,
    pub icon: Option<ImageUrl>,
}

/// Category creation request; the slug is derived from `text` when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub text: DisplayText,
    pub slug: Option<Slug>,
    pub icon: Option<ImageUrl>,
}

/// Category insert with a resolved slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub text: DisplayText,
    pub slug: Slug,
    pub icon: Option<ImageUrl>,
}

/// Partial category update.
///
/// Services pass the same type to storage with `slug` replaced by the
/// resolved value, or `None` when the slug stays unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub text: Option<DisplayText>,
    pub slug: Option<Slug>,
    pub icon: Option<ImageUrl>,
}
