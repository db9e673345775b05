//! Storefront filters attached to a category.

use super::{DisplayText, ImageUrl};

/// Stored filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub id: i32,
    pub category_id: i32,
    pub text: DisplayText,
    pub image: Option<ImageUrl>,
    pub status: bool,
}

/// Filter creation or full replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDraft {
    pub category_id: i32,
    pub text: DisplayText,
    pub image: Option<ImageUrl>,
    pub status: bool,
}
