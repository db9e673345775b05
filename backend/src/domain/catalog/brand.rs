//! Brands. Brands carry no generated identifiers.

use super::{DisplayText, ImageUrl};

/// Stored brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brand {
    pub id: i32,
    pub name: DisplayText,
    pub image: ImageUrl,
}

/// Brand creation or full replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandDraft {
    pub name: DisplayText,
    pub image: ImageUrl,
}
