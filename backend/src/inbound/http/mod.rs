//! HTTP inbound adapter exposing the catalogue REST endpoints.

use actix_web::web;

use crate::domain::Error;

pub mod brands;
pub mod categories;
pub mod characteristics;
pub mod error;
pub mod filters;
pub mod health;
pub mod params;
pub mod products;
pub mod schemas;
pub mod state;
pub mod subcategories;
pub mod tags;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register every catalogue handler. Mount under `/api/v1`.
///
/// Fixed path segments (`/tags/value/{value}`) are registered before the
/// `{id}` routes that could otherwise claim them.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(categories::list_categories)
        .service(categories::get_category_by_slug)
        .service(categories::get_category)
        .service(categories::create_category)
        .service(categories::update_category)
        .service(categories::delete_category)
        .service(subcategories::list_subcategories)
        .service(subcategories::get_subcategory_by_slug)
        .service(subcategories::get_subcategory)
        .service(subcategories::create_subcategory)
        .service(subcategories::update_subcategory)
        .service(subcategories::delete_subcategory)
        .service(brands::list_brands)
        .service(brands::get_brand)
        .service(brands::list_brand_products)
        .service(brands::create_brand)
        .service(brands::update_brand)
        .service(brands::delete_brand)
        .service(products::list_products)
        .service(products::get_product_by_slug)
        .service(products::get_product_by_article)
        .service(products::get_product)
        .service(products::create_product)
        .service(products::update_product)
        .service(products::delete_product)
        .service(tags::list_tags)
        .service(tags::get_tag_by_value)
        .service(tags::get_tag)
        .service(tags::list_tag_products)
        .service(tags::create_tag)
        .service(tags::update_tag)
        .service(tags::delete_tag)
        .service(filters::list_filters)
        .service(filters::get_filter)
        .service(filters::create_filter)
        .service(filters::update_filter)
        .service(filters::delete_filter)
        .service(characteristics::list_characteristics)
        .service(characteristics::get_characteristic)
        .service(characteristics::create_characteristic)
        .service(characteristics::update_characteristic)
        .service(characteristics::delete_characteristic);
}

/// JSON extractor configuration reporting malformed bodies as
/// `invalid_request` errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("malformed JSON body: {err}"))
            .with_details(serde_json::json!({ "code": "malformed_body" }))
            .into()
    })
}
