//! Products, the richest catalogue entity.
//!
//! A product carries two generated identifiers: a slug for URLs and a
//! numeric article for order handling. Tags are referenced by name and
//! created on first use; characteristics are referenced by item id.

use crate::domain::identifiers::{Article, Slug};

use super::{Discount, DisplayText, Price, ProductImages, Tag};

/// Stored product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub text: DisplayText,
    pub slug: Slug,
    pub article: Article,
    pub price: Price,
    pub discount: Discount,
    pub in_stock: bool,
    pub small_description: Option<String>,
    pub full_description: Option<String>,
    pub subcategory_id: i32,
    pub brand_id: Option<i32>,
    pub images: ProductImages,
    pub tags: Vec<Tag>,
    pub characteristic_ids: Vec<i32>,
}

/// Product creation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub text: DisplayText,
    pub slug: Option<Slug>,
    pub article: Option<Article>,
    pub price: Price,
    pub discount: Discount,
    pub in_stock: bool,
    pub small_description: Option<String>,
    pub full_description: Option<String>,
    pub subcategory_id: i32,
    pub brand_id: Option<i32>,
    pub images: ProductImages,
    pub tag_names: Vec<DisplayText>,
    pub characteristic_ids: Vec<i32>,
}

/// Product insert with resolved identifiers and tag ids.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub text: DisplayText,
    pub slug: Slug,
    pub article: Article,
    pub price: Price,
    pub discount: Discount,
    pub in_stock: bool,
    pub small_description: Option<String>,
    pub full_description: Option<String>,
    pub subcategory_id: i32,
    pub brand_id: Option<i32>,
    pub images: ProductImages,
    pub tag_ids: Vec<i32>,
    pub characteristic_ids: Vec<i32>,
}

/// Partial product update.
///
/// `tag_names` and `characteristic_ids`, when present, replace the current
/// links.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub text: Option<DisplayText>,
    pub slug: Option<Slug>,
    pub article: Option<Article>,
    pub price: Option<Price>,
    pub discount: Option<Discount>,
    pub in_stock: Option<bool>,
    pub small_description: Option<String>,
    pub full_description: Option<String>,
    pub subcategory_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub images: Option<ProductImages>,
    pub tag_names: Option<Vec<DisplayText>>,
    pub characteristic_ids: Option<Vec<i32>>,
}

/// Product update as applied by storage, with identifiers resolved and tag
/// names replaced by ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub text: Option<DisplayText>,
    pub slug: Option<Slug>,
    pub article: Option<Article>,
    pub price: Option<Price>,
    pub discount: Option<Discount>,
    pub in_stock: Option<bool>,
    pub small_description: Option<String>,
    pub full_description: Option<String>,
    pub subcategory_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub images: Option<ProductImages>,
    pub tag_ids: Option<Vec<i32>>,
    pub characteristic_ids: Option<Vec<i32>>,
}

/// Products of one brand together with the brand's total product count.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductsByBrand {
    pub products: Vec<Product>,
    pub total: i64,
}

/// Products carrying one tag together with the tag's total product count.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductsByTag {
    pub tag: Tag,
    pub products: Vec<Product>,
    pub total: i64,
}
