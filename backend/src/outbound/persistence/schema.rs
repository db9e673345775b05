//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. The
//! `diesel print-schema` command can regenerate them from a live database.

diesel::table! {
    /// Top-level catalogue sections.
    categories (id) {
        id -> Int4,
        text -> Varchar,
        /// Unique URL identifier (`categories_slug_key`).
        slug -> Varchar,
        icon -> Nullable<Text>,
    }
}

diesel::table! {
    brands (id) {
        id -> Int4,
        name -> Varchar,
        image -> Text,
    }
}

diesel::table! {
    /// Second-level sections owned by a category.
    subcategories (id) {
        id -> Int4,
        text -> Varchar,
        /// Unique URL identifier (`subcategories_slug_key`).
        slug -> Varchar,
        image -> Text,
        category_id -> Int4,
        brand_id -> Nullable<Int4>,
    }
}

diesel::table! {
    filters (id) {
        id -> Int4,
        category_id -> Int4,
        text -> Varchar,
        image -> Nullable<Text>,
        status -> Bool,
    }
}

diesel::table! {
    /// Product labels; both `name` and `value` are unique.
    tags (id) {
        id -> Int4,
        name -> Varchar,
        value -> Varchar,
    }
}

diesel::table! {
    characteristic_templates (id) {
        id -> Int4,
        name -> Varchar,
        description -> Nullable<Text>,
    }
}

diesel::table! {
    /// Items of a template; deleted with their template.
    characteristic_items (id) {
        id -> Int4,
        template_id -> Int4,
        name -> Varchar,
        label -> Varchar,
        value -> Text,
    }
}

diesel::table! {
    products (id) {
        id -> Int4,
        text -> Varchar,
        /// Unique URL identifier (`products_slug_key`).
        slug -> Varchar,
        /// Unique numeric identifier (`products_article_key`).
        article -> Int8,
        price -> Float8,
        discount -> Float8,
        in_stock -> Bool,
        small_description -> Nullable<Text>,
        full_description -> Nullable<Text>,
        subcategory_id -> Int4,
        brand_id -> Nullable<Int4>,
    }
}

diesel::table! {
    /// Ordered product image URLs.
    product_images (product_id, position) {
        product_id -> Int4,
        position -> Int2,
        url -> Text,
    }
}

diesel::table! {
    product_tags (product_id, tag_id) {
        product_id -> Int4,
        tag_id -> Int4,
    }
}

diesel::table! {
    product_characteristics (product_id, characteristic_id) {
        product_id -> Int4,
        characteristic_id -> Int4,
    }
}

diesel::joinable!(subcategories -> categories (category_id));
diesel::joinable!(subcategories -> brands (brand_id));
diesel::joinable!(filters -> categories (category_id));
diesel::joinable!(characteristic_items -> characteristic_templates (template_id));
diesel::joinable!(products -> subcategories (subcategory_id));
diesel::joinable!(products -> brands (brand_id));
diesel::joinable!(product_images -> products (product_id));
diesel::joinable!(product_tags -> products (product_id));
diesel::joinable!(product_tags -> tags (tag_id));
diesel::joinable!(product_characteristics -> products (product_id));
diesel::joinable!(product_characteristics -> characteristic_items (characteristic_id));

diesel::allow_tables_to_appear_in_same_query!(
    brands,
    categories,
    characteristic_items,
    characteristic_templates,
    filters,
    product_characteristics,
    product_images,
    product_tags,
    products,
    subcategories,
    tags,
);
