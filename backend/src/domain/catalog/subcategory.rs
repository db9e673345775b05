//! Subcategories nested under a category and optionally tied to a brand.

use crate::domain::identifiers::Slug;

use super::{DisplayText, ImageUrl};

/// Stored subcategory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcategory {
    pub id: i32,
    pub text: DisplayText,
    pub slug: Slug,
    pub image: ImageUrl,
    pub category_id: i32,
    pub brand_id: Option<i32>,
}

/// Subcategory creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryDraft {
    pub text: DisplayText,
    pub slug: Option<Slug>,
    pub image: ImageUrl,
    pub category_id: i32,
    pub brand_id: Option<i32>,
}

/// Subcategory insert with a resolved slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubcategory {
    pub text: DisplayText,
    pub slug: Slug,
    pub image: ImageUrl,
    pub category_id: i32,
    pub brand_id: Option<i32>,
}

/// Partial subcategory update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubcategoryPatch {
    pub text: Option<DisplayText>,
    pub slug: Option<Slug>,
    pub image: Option<ImageUrl>,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
}
