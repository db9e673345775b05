//! Brand HTTP handlers.
//!
//! ```text
//! GET    /api/v1/brands
//! GET    /api/v1/brands/{id}
//! GET    /api/v1/brands/{id}/products
//! POST   /api/v1/brands
//! PUT    /api/v1/brands/{id}
//! DELETE /api/v1/brands/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::catalog::{Brand, BrandDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::params::ListQuery;
use crate::inbound::http::products::ProductResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_image, parse_text};

/// Brand creation or full replacement payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandRequest {
    pub name: String,
    pub image: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
}

impl From<Brand> for BrandResponse {
    fn from(value: Brand) -> Self {
        Self {
            id: value.id,
            name: value.name.into(),
            image: value.image.into(),
        }
    }
}

/// One window of a brand's products with the brand's product count.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandProductsResponse {
    pub products: Vec<ProductResponse>,
    pub total: i64,
}

fn parse_brand(payload: BrandRequest) -> Result<BrandDraft, Error> {
    Ok(BrandDraft {
        name: parse_text(&payload.name, FieldName::new("name"))?,
        image: parse_image(&payload.image, FieldName::new("image"))?,
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/brands",
    params(
        ("offset" = Option<i64>, Query, description = "Records to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, default and max 100")
    ),
    responses((status = 200, description = "Brands", body = [BrandResponse])),
    tags = ["brands"],
    operation_id = "listBrands"
)]
#[get("/brands")]
pub async fn list_brands(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<Vec<BrandResponse>>> {
    let brands = state.brands.list(query.window()).await?;
    Ok(web::Json(brands.into_iter().map(BrandResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/brands/{id}",
    params(("id" = i32, Path, description = "Brand identifier")),
    responses(
        (status = 200, description = "Brand", body = BrandResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["brands"],
    operation_id = "getBrand"
)]
#[get("/brands/{id}")]
pub async fn get_brand(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<BrandResponse>> {
    let brand = state.brands.get(path.into_inner()).await?;
    Ok(web::Json(brand.into()))
}

/// List a brand's products.
#[utoipa::path(
    get,
    path = "/api/v1/brands/{id}/products",
    params(
        ("id" = i32, Path, description = "Brand identifier"),
        ("offset" = Option<i64>, Query, description = "Records to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, default and max 100")
    ),
    responses(
        (status = 200, description = "Brand products", body = BrandProductsResponse),
        (status = 404, description = "Brand not found", body = ErrorSchema)
    ),
    tags = ["brands"],
    operation_id = "listBrandProducts"
)]
#[get("/brands/{id}/products")]
pub async fn list_brand_products(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<BrandProductsResponse>> {
    let brand = state.brands.get(path.into_inner()).await?;
    let page = state.products.list_by_brand(brand.id, query.window()).await?;
    Ok(web::Json(BrandProductsResponse {
        products: page.products.into_iter().map(ProductResponse::from).collect(),
        total: page.total,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/brands",
    request_body = BrandRequest,
    responses(
        (status = 201, description = "Created brand", body = BrandResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["brands"],
    operation_id = "createBrand"
)]
#[post("/brands")]
pub async fn create_brand(
    state: web::Data<HttpState>,
    payload: web::Json<BrandRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_brand(payload.into_inner())?;
    let brand = state.brands.create(draft).await?;
    Ok(HttpResponse::Created().json(BrandResponse::from(brand)))
}

#[utoipa::path(
    put,
    path = "/api/v1/brands/{id}",
    params(("id" = i32, Path, description = "Brand identifier")),
    request_body = BrandRequest,
    responses(
        (status = 200, description = "Updated brand", body = BrandResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["brands"],
    operation_id = "updateBrand"
)]
#[put("/brands/{id}")]
pub async fn update_brand(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<BrandRequest>,
) -> ApiResult<web::Json<BrandResponse>> {
    let draft = parse_brand(payload.into_inner())?;
    let brand = state.brands.update(path.into_inner(), draft).await?;
    Ok(web::Json(brand.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/brands/{id}",
    params(("id" = i32, Path, description = "Brand identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Still referenced", body = ErrorSchema)
    ),
    tags = ["brands"],
    operation_id = "deleteBrand"
)]
#[delete("/brands/{id}")]
pub async fn delete_brand(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.brands.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::test_app;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[actix_web::test]
    async fn put_replaces_the_brand() {
        let app = test_app().await;
        let id = app
            .create(
                "/api/v1/brands",
                json!({"name": "Nimbus", "image": "https://cdn.example.com/n.png"}),
            )
            .await;
        let res = app
            .put(
                &format!("/api/v1/brands/{id}"),
                json!({"name": "Nimbus Sport", "image": "https://cdn.example.com/ns.png"}),
            )
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: BrandResponse = test::read_body_json(res).await;
        assert_eq!(body.name, "Nimbus Sport");
    }

    #[rstest]
    #[actix_web::test]
    async fn brand_products_for_unknown_brand_is_404() {
        let app = test_app().await;
        let res = app.get("/api/v1/brands/5/products").await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn invalid_image_is_rejected() {
        let app = test_app().await;
        let res = app
            .post("/api/v1/brands", json!({"name": "Nimbus", "image": "n.png"}))
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
