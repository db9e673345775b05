//! Filter HTTP handlers.
//!
//! ```text
//! GET    /api/v1/filters[?categoryId=]
//! GET    /api/v1/filters/{id}
//! POST   /api/v1/filters
//! PUT    /api/v1/filters/{id}
//! DELETE /api/v1/filters/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::catalog::{Filter, FilterDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::params::CategoryListQuery;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_image, parse_text};

fn default_status() -> bool {
    true
}

/// Filter creation or full replacement payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    pub category_id: i32,
    pub text: String,
    pub image: Option<String>,
    #[serde(default = "default_status")]
    pub status: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterResponse {
    pub id: i32,
    pub category_id: i32,
    pub text: String,
    pub image: Option<String>,
    pub status: bool,
}

impl From<Filter> for FilterResponse {
    fn from(value: Filter) -> Self {
        Self {
            id: value.id,
            category_id: value.category_id,
            text: value.text.into(),
            image: value.image.map(Into::into),
            status: value.status,
        }
    }
}

fn parse_filter(payload: FilterRequest) -> Result<FilterDraft, Error> {
    Ok(FilterDraft {
        category_id: payload.category_id,
        text: parse_text(&payload.text, FieldName::new("text"))?,
        image: parse_optional_image(payload.image, FieldName::new("image"))?,
        status: payload.status,
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/filters",
    params(
        ("categoryId" = Option<i32>, Query, description = "Only filters of this category"),
        ("offset" = Option<i64>, Query, description = "Records to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, default and max 100")
    ),
    responses((status = 200, description = "Filters", body = [FilterResponse])),
    tags = ["filters"],
    operation_id = "listFilters"
)]
#[get("/filters")]
pub async fn list_filters(
    state: web::Data<HttpState>,
    query: web::Query<CategoryListQuery>,
) -> ApiResult<web::Json<Vec<FilterResponse>>> {
    let filters = match query.category_id {
        Some(category_id) => state.filters.list_by_category(category_id).await?,
        None => state.filters.list(query.window()).await?,
    };
    Ok(web::Json(filters.into_iter().map(FilterResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/filters/{id}",
    params(("id" = i32, Path, description = "Filter identifier")),
    responses(
        (status = 200, description = "Filter", body = FilterResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["filters"],
    operation_id = "getFilter"
)]
#[get("/filters/{id}")]
pub async fn get_filter(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<FilterResponse>> {
    let filter = state.filters.get(path.into_inner()).await?;
    Ok(web::Json(filter.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/filters",
    request_body = FilterRequest,
    responses(
        (status = 201, description = "Created filter", body = FilterResponse),
        (status = 400, description = "Invalid request or unknown category", body = ErrorSchema)
    ),
    tags = ["filters"],
    operation_id = "createFilter"
)]
#[post("/filters")]
pub async fn create_filter(
    state: web::Data<HttpState>,
    payload: web::Json<FilterRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_filter(payload.into_inner())?;
    let filter = state.filters.create(draft).await?;
    Ok(HttpResponse::Created().json(FilterResponse::from(filter)))
}

#[utoipa::path(
    put,
    path = "/api/v1/filters/{id}",
    params(("id" = i32, Path, description = "Filter identifier")),
    request_body = FilterRequest,
    responses(
        (status = 200, description = "Updated filter", body = FilterResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["filters"],
    operation_id = "updateFilter"
)]
#[put("/filters/{id}")]
pub async fn update_filter(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<FilterRequest>,
) -> ApiResult<web::Json<FilterResponse>> {
    let draft = parse_filter(payload.into_inner())?;
    let filter = state.filters.update(path.into_inner(), draft).await?;
    Ok(web::Json(filter.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/filters/{id}",
    params(("id" = i32, Path, description = "Filter identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["filters"],
    operation_id = "deleteFilter"
)]
#[delete("/filters/{id}")]
pub async fn delete_filter(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.filters.delete(path.into_inner()).await?;
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
    async fn status_defaults_to_enabled() {
        let app = test_app().await;
        let category = app.create("/api/v1/categories", json!({"text": "Shoes"})).await;
        let res = app
            .post(
                "/api/v1/filters",
                json!({"categoryId": category, "text": "Waterproof"}),
            )
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: FilterResponse = test::read_body_json(res).await;
        assert!(body.status);
        assert_eq!(body.image, None);
    }

    #[rstest]
    #[actix_web::test]
    async fn list_narrows_by_category() {
        let app = test_app().await;
        let shoes = app.create("/api/v1/categories", json!({"text": "Shoes"})).await;
        let hats = app.create("/api/v1/categories", json!({"text": "Hats"})).await;
        app.create("/api/v1/filters", json!({"categoryId": shoes, "text": "Waterproof"}))
            .await;
        app.create("/api/v1/filters", json!({"categoryId": hats, "text": "Wool"}))
            .await;

        let res = app.get(&format!("/api/v1/filters?categoryId={hats}")).await;
        let body: Vec<FilterResponse> = test::read_body_json(res).await;
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].text, "Wool");
    }
}
