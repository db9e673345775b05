//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every catalogue endpoint from the inbound layer, the
//! health probes and the shared error schemas. The document is served by
//! Swagger UI in debug builds and exported via `cargo run --bin
//! openapi-dump` for external tooling.

use crate::inbound::http::brands::{BrandProductsResponse, BrandRequest, BrandResponse};
use crate::inbound::http::categories::{
    CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest,
};
use crate::inbound::http::characteristics::{
    CharacteristicItemRequest, CharacteristicItemResponse, CharacteristicResponse,
    CreateCharacteristicRequest, UpdateCharacteristicRequest,
};
use crate::inbound::http::filters::{FilterRequest, FilterResponse};
use crate::inbound::http::products::{
    CreateProductRequest, ProductResponse, UpdateProductRequest,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorDetailsSchema, ErrorSchema};
use crate::inbound::http::subcategories::{
    CreateSubcategoryRequest, SubcategoryResponse, UpdateSubcategoryRequest,
};
use crate::inbound::http::tags::{
    CreateTagRequest, TagProductsResponse, TagResponse, UpdateTagRequest,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalogue backend API",
        description = "Product catalogue: categories, subcategories, brands, products, tags, filters and characteristic templates."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::get_category,
        crate::inbound::http::categories::get_category_by_slug,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::update_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::subcategories::list_subcategories,
        crate::inbound::http::subcategories::get_subcategory,
        crate::inbound::http::subcategories::get_subcategory_by_slug,
        crate::inbound::http::subcategories::create_subcategory,
        crate::inbound::http::subcategories::update_subcategory,
        crate::inbound::http::subcategories::delete_subcategory,
        crate::inbound::http::brands::list_brands,
        crate::inbound::http::brands::get_brand,
        crate::inbound::http::brands::list_brand_products,
        crate::inbound::http::brands::create_brand,
        crate::inbound::http::brands::update_brand,
        crate::inbound::http::brands::delete_brand,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::get_product_by_slug,
        crate::inbound::http::products::get_product_by_article,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::tags::list_tags,
        crate::inbound::http::tags::get_tag,
        crate::inbound::http::tags::get_tag_by_value,
        crate::inbound::http::tags::list_tag_products,
        crate::inbound::http::tags::create_tag,
        crate::inbound::http::tags::update_tag,
        crate::inbound::http::tags::delete_tag,
        crate::inbound::http::filters::list_filters,
        crate::inbound::http::filters::get_filter,
        crate::inbound::http::filters::create_filter,
        crate::inbound::http::filters::update_filter,
        crate::inbound::http::filters::delete_filter,
        crate::inbound::http::characteristics::list_characteristics,
        crate::inbound::http::characteristics::get_characteristic,
        crate::inbound::http::characteristics::create_characteristic,
        crate::inbound::http::characteristics::update_characteristic,
        crate::inbound::http::characteristics::delete_characteristic,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ErrorDetailsSchema,
        CreateCategoryRequest,
        UpdateCategoryRequest,
        CategoryResponse,
        CreateSubcategoryRequest,
        UpdateSubcategoryRequest,
        SubcategoryResponse,
        BrandRequest,
        BrandResponse,
        BrandProductsResponse,
        CreateProductRequest,
        UpdateProductRequest,
        ProductResponse,
        CreateTagRequest,
        UpdateTagRequest,
        TagResponse,
        TagProductsResponse,
        FilterRequest,
        FilterResponse,
        CharacteristicItemRequest,
        CreateCharacteristicRequest,
        UpdateCharacteristicRequest,
        CharacteristicItemResponse,
        CharacteristicResponse,
    )),
    tags(
        (name = "categories", description = "Top-level catalogue sections"),
        (name = "subcategories", description = "Sections within a category"),
        (name = "brands", description = "Product brands"),
        (name = "products", description = "Products with images, tags and characteristics"),
        (name = "tags", description = "Product tags addressed by value"),
        (name = "filters", description = "Category filters"),
        (name = "characteristics", description = "Characteristic templates and items"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    fn product_schema_uses_camel_case() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let product = schemas.get("ProductResponse").expect("ProductResponse schema");

        assert_object_schema_has_field(product, "inStock");
        assert_object_schema_has_field(product, "characteristicIds");
    }

    #[rstest]
    #[case("/api/v1/categories/slug/{slug}")]
    #[case("/api/v1/products/article/{article}")]
    #[case("/api/v1/tags/value/{value}")]
    #[case("/api/v1/brands/{id}/products")]
    #[case("/health/ready")]
    fn lookup_paths_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }
}
