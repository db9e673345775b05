//! Error type shared by the catalogue storage ports.

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalogue storage adapters.
    pub enum CatalogRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "catalogue repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "catalogue repository query failed: {message}",
        /// A write collided with a unique constraint.
        UniqueViolation { constraint: String } =>
            "unique constraint {constraint} violated",
        /// A write referenced a record that does not exist.
        MissingReference { constraint: String } =>
            "referenced record missing for {constraint}",
        /// A delete targeted a record other records still reference.
        StillReferenced { constraint: String } =>
            "record still referenced through {constraint}",
    }
}

/// Constraint names shared by every storage adapter.
///
/// The PostgreSQL migrations declare constraints under these names so that
/// violations can be attributed to a field.
pub mod constraints {
    pub const CATEGORY_SLUG: &str = "categories_slug_key";
    pub const SUBCATEGORY_SLUG: &str = "subcategories_slug_key";
    pub const PRODUCT_SLUG: &str = "products_slug_key";
    pub const PRODUCT_ARTICLE: &str = "products_article_key";
    pub const TAG_NAME: &str = "tags_name_key";
    pub const TAG_VALUE: &str = "tags_value_key";
    pub const TEMPLATE_NAME: &str = "characteristic_templates_name_key";

    pub const SUBCATEGORY_CATEGORY: &str = "subcategories_category_id_fkey";
    pub const SUBCATEGORY_BRAND: &str = "subcategories_brand_id_fkey";
    pub const PRODUCT_SUBCATEGORY: &str = "products_subcategory_id_fkey";
    pub const PRODUCT_BRAND: &str = "products_brand_id_fkey";
    pub const FILTER_CATEGORY: &str = "filters_category_id_fkey";
    pub const PRODUCT_TAG: &str = "product_tags_tag_id_fkey";
    pub const PRODUCT_CHARACTERISTIC_ITEM: &str = "product_characteristics_characteristic_id_fkey";
}
