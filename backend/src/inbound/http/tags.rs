//! Tag HTTP handlers.
//!
//! ```text
//! GET    /api/v1/tags
//! GET    /api/v1/tags/{id}
//! GET    /api/v1/tags/value/{value}
//! GET    /api/v1/tags/{id}/products[?limit=]
//! POST   /api/v1/tags
//! PUT    /api/v1/tags/{id}
//! DELETE /api/v1/tags/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::catalog::{ProductsByTag, Tag, TagDraft, TagPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::params::{LimitQuery, ListQuery};
use crate::inbound::http::products::ProductResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_optional_text, parse_tag_value, parse_tag_value_override, parse_text,
};

const NAME: FieldName = FieldName::new("name");
const VALUE: FieldName = FieldName::new("value");

/// Request payload for creating a tag.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagRequest {
    pub name: String,
    /// Explicit value; derived from `name` when absent or empty.
    pub value: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTagRequest {
    pub name: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
    pub value: String,
}

impl From<Tag> for TagResponse {
    fn from(value: Tag) -> Self {
        Self {
            id: value.id,
            name: value.name.into(),
            value: value.value.as_str().to_owned(),
        }
    }
}

/// A tag with up to `limit` of its products and its product count.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagProductsResponse {
    pub tag: TagResponse,
    pub products: Vec<ProductResponse>,
    pub total: i64,
}

impl From<ProductsByTag> for TagProductsResponse {
    fn from(value: ProductsByTag) -> Self {
        Self {
            tag: value.tag.into(),
            products: value.products.into_iter().map(ProductResponse::from).collect(),
            total: value.total,
        }
    }
}

fn parse_create(payload: CreateTagRequest) -> Result<TagDraft, Error> {
    Ok(TagDraft {
        name: parse_text(&payload.name, NAME)?,
        value: parse_tag_value_override(payload.value, VALUE)?,
    })
}

fn parse_update(payload: UpdateTagRequest) -> Result<TagPatch, Error> {
    Ok(TagPatch {
        name: parse_optional_text(payload.name, NAME)?,
        value: parse_tag_value_override(payload.value, VALUE)?,
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/tags",
    params(
        ("offset" = Option<i64>, Query, description = "Records to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, default and max 100")
    ),
    responses((status = 200, description = "Tags", body = [TagResponse])),
    tags = ["tags"],
    operation_id = "listTags"
)]
#[get("/tags")]
pub async fn list_tags(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<Vec<TagResponse>>> {
    let tags = state.tags.list(query.window()).await?;
    Ok(web::Json(tags.into_iter().map(TagResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/tags/{id}",
    params(("id" = i32, Path, description = "Tag identifier")),
    responses(
        (status = 200, description = "Tag", body = TagResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "getTag"
)]
#[get("/tags/{id}")]
pub async fn get_tag(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<TagResponse>> {
    let tag = state.tags.get(path.into_inner()).await?;
    Ok(web::Json(tag.into()))
}

/// Fetch a tag by value together with its products.
#[utoipa::path(
    get,
    path = "/api/v1/tags/value/{value}",
    params(
        ("value" = String, Path, description = "Tag value"),
        ("limit" = Option<i64>, Query, description = "Products to include, default 20, max 50")
    ),
    responses(
        (status = 200, description = "Tag and products", body = TagProductsResponse),
        (status = 400, description = "Malformed value", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "getTagByValue"
)]
#[get("/tags/value/{value}")]
pub async fn get_tag_by_value(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<LimitQuery>,
) -> ApiResult<web::Json<TagProductsResponse>> {
    let value = parse_tag_value(&path.into_inner(), VALUE)?;
    let page = state
        .products
        .products_for_tag_value(&value, query.limit)
        .await?;
    Ok(web::Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/tags/{id}/products",
    params(
        ("id" = i32, Path, description = "Tag identifier"),
        ("limit" = Option<i64>, Query, description = "Products to include, default 20, max 50")
    ),
    responses(
        (status = 200, description = "Tag and products", body = TagProductsResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "listTagProducts"
)]
#[get("/tags/{id}/products")]
pub async fn list_tag_products(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    query: web::Query<LimitQuery>,
) -> ApiResult<web::Json<TagProductsResponse>> {
    let page = state
        .products
        .products_for_tag_id(path.into_inner(), query.limit)
        .await?;
    Ok(web::Json(page.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/tags",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Created tag", body = TagResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Name or value already in use", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "createTag"
)]
#[post("/tags")]
pub async fn create_tag(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTagRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_create(payload.into_inner())?;
    let tag = state.tags.create(draft).await?;
    Ok(HttpResponse::Created().json(TagResponse::from(tag)))
}

#[utoipa::path(
    put,
    path = "/api/v1/tags/{id}",
    params(("id" = i32, Path, description = "Tag identifier")),
    request_body = UpdateTagRequest,
    responses(
        (status = 200, description = "Updated tag", body = TagResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Name or value already in use", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "updateTag"
)]
#[put("/tags/{id}")]
pub async fn update_tag(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateTagRequest>,
) -> ApiResult<web::Json<TagResponse>> {
    let patch = parse_update(payload.into_inner())?;
    let tag = state.tags.update(path.into_inner(), patch).await?;
    Ok(web::Json(tag.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tags/{id}",
    params(("id" = i32, Path, description = "Tag identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "deleteTag"
)]
#[delete("/tags/{id}")]
pub async fn delete_tag(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.tags.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::test_app;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[actix_web::test]
    async fn value_is_derived_and_suffixed() {
        let app = test_app().await;
        let first = app.post("/api/v1/tags", json!({"name": "Беговые кроссовки"})).await;
        let first: TagResponse = test::read_body_json(first).await;
        assert_eq!(first.value, "begovye_krossovki");

        let second = app.post("/api/v1/tags", json!({"name": "Begovye  krossovki!"})).await;
        assert_eq!(second.status(), StatusCode::CREATED);
        let second: TagResponse = test::read_body_json(second).await;
        assert_eq!(second.value, "begovye_krossovki_1");
    }

    #[rstest]
    #[actix_web::test]
    async fn duplicate_name_is_a_conflict() {
        let app = test_app().await;
        app.create("/api/v1/tags", json!({"name": "Sale"})).await;
        let res = app.post("/api/v1/tags", json!({"name": "Sale"})).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "name");
    }

    #[rstest]
    #[actix_web::test]
    async fn tag_value_route_returns_empty_product_list() {
        let app = test_app().await;
        app.create("/api/v1/tags", json!({"name": "New Arrivals"})).await;

        let res = app.get("/api/v1/tags/value/new_arrivals?limit=5").await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: TagProductsResponse = test::read_body_json(res).await;
        assert_eq!(body.tag.name, "New Arrivals");
        assert!(body.products.is_empty());
        assert_eq!(body.total, 0);
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_tag_products_is_404() {
        let app = test_app().await;
        let res = app.get("/api/v1/tags/42/products").await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
