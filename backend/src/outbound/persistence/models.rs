//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use super::schema::{
    brands, categories, characteristic_items, characteristic_templates, filters,
    product_characteristics, product_images, product_tags, products, subcategories, tags,
};

// ---------------------------------------------------------------------------
// Categories and subcategories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: i32,
    pub text: String,
    pub slug: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub(crate) struct NewCategoryRow<'a> {
    pub text: &'a str,
    pub slug: &'a str,
    pub icon: Option<&'a str>,
}

/// Partial category update; `None` leaves a column untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = categories)]
pub(crate) struct CategoryChangeset<'a> {
    pub text: Option<&'a str>,
    pub slug: Option<&'a str>,
    pub icon: Option<&'a str>,
}

impl CategoryChangeset<'_> {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.slug.is_none() && self.icon.is_none()
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = subcategories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubcategoryRow {
    pub id: i32,
    pub text: String,
    pub slug: String,
    pub image: String,
    pub category_id: i32,
    pub brand_id: Option<i32>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subcategories)]
pub(crate) struct NewSubcategoryRow<'a> {
    pub text: &'a str,
    pub slug: &'a str,
    pub image: &'a str,
    pub category_id: i32,
    pub brand_id: Option<i32>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = subcategories)]
pub(crate) struct SubcategoryChangeset<'a> {
    pub text: Option<&'a str>,
    pub slug: Option<&'a str>,
    pub image: Option<&'a str>,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
}

impl SubcategoryChangeset<'_> {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.slug.is_none()
            && self.image.is_none()
            && self.category_id.is_none()
            && self.brand_id.is_none()
    }
}

// ---------------------------------------------------------------------------
// Brands and filters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = brands)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BrandRow {
    pub id: i32,
    pub name: String,
    pub image: String,
}

/// Full brand values, used for both insert and replace.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = brands)]
pub(crate) struct BrandValues<'a> {
    pub name: &'a str,
    pub image: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = filters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FilterRow {
    pub id: i32,
    pub category_id: i32,
    pub text: String,
    pub image: Option<String>,
    pub status: bool,
}

/// Full filter values, used for both insert and replace.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = filters)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct FilterValues<'a> {
    pub category_id: i32,
    pub text: &'a str,
    pub image: Option<&'a str>,
    pub status: bool,
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TagRow {
    pub id: i32,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tags)]
pub(crate) struct NewTagRow<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tags)]
pub(crate) struct TagChangeset<'a> {
    pub name: Option<&'a str>,
    pub value: Option<&'a str>,
}

impl TagChangeset<'_> {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.value.is_none()
    }
}

// ---------------------------------------------------------------------------
// Characteristic templates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = characteristic_templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TemplateRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = characteristic_templates)]
pub(crate) struct NewTemplateRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = characteristic_templates)]
pub(crate) struct TemplateChangeset<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
}

impl TemplateChangeset<'_> {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = characteristic_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ItemRow {
    pub id: i32,
    pub template_id: i32,
    pub name: String,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = characteristic_items)]
pub(crate) struct NewItemRow<'a> {
    pub template_id: i32,
    pub name: &'a str,
    pub label: &'a str,
    pub value: &'a str,
}

// ---------------------------------------------------------------------------
// Products and their links
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: i32,
    pub text: String,
    pub slug: String,
    pub article: i64,
    pub price: f64,
    pub discount: f64,
    pub in_stock: bool,
    pub small_description: Option<String>,
    pub full_description: Option<String>,
    pub subcategory_id: i32,
    pub brand_id: Option<i32>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
pub(crate) struct NewProductRow<'a> {
    pub text: &'a str,
    pub slug: &'a str,
    pub article: i64,
    pub price: f64,
    pub discount: f64,
    pub in_stock: bool,
    pub small_description: Option<&'a str>,
    pub full_description: Option<&'a str>,
    pub subcategory_id: i32,
    pub brand_id: Option<i32>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = products)]
pub(crate) struct ProductChangeset<'a> {
    pub text: Option<&'a str>,
    pub slug: Option<&'a str>,
    pub article: Option<i64>,
    pub price: Option<f64>,
    pub discount: Option<f64>,
    pub in_stock: Option<bool>,
    pub small_description: Option<&'a str>,
    pub full_description: Option<&'a str>,
    pub subcategory_id: Option<i32>,
    pub brand_id: Option<i32>,
}

impl ProductChangeset<'_> {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.slug.is_none()
            && self.article.is_none()
            && self.price.is_none()
            && self.discount.is_none()
            && self.in_stock.is_none()
            && self.small_description.is_none()
            && self.full_description.is_none()
            && self.subcategory_id.is_none()
            && self.brand_id.is_none()
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = product_images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductImageRow {
    pub product_id: i32,
    pub position: i16,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = product_tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductTagRow {
    pub product_id: i32,
    pub tag_id: i32,
}

#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = product_characteristics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductCharacteristicRow {
    pub product_id: i32,
    pub characteristic_id: i32,
}
