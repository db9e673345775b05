//! Subcategory HTTP handlers.
//!
//! ```text
//! GET    /api/v1/subcategories[?categoryId=]
//! GET    /api/v1/subcategories/{id}
//! GET    /api/v1/subcategories/slug/{slug}
//! POST   /api/v1/subcategories
//! PUT    /api/v1/subcategories/{id}
//! DELETE /api/v1/subcategories/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::catalog::{Subcategory, SubcategoryDraft, SubcategoryPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::params::CategoryListQuery;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_image, parse_optional_image, parse_optional_text, parse_slug,
    parse_slug_override, parse_text,
};

const TEXT: FieldName = FieldName::new("text");
const SLUG: FieldName = FieldName::new("slug");
const IMAGE: FieldName = FieldName::new("image");

/// Request payload for creating a subcategory.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubcategoryRequest {
    pub text: String,
    pub slug: Option<String>,
    pub image: String,
    pub category_id: i32,
    pub brand_id: Option<i32>,
}

/// Request payload for updating a subcategory. Absent fields stay unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubcategoryRequest {
    pub text: Option<String>,
    pub slug: Option<String>,
    pub image: Option<String>,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryResponse {
    pub id: i32,
    pub text: String,
    pub slug: String,
    pub image: String,
    pub category_id: i32,
    pub brand_id: Option<i32>,
}

impl From<Subcategory> for SubcategoryResponse {
    fn from(value: Subcategory) -> Self {
        Self {
            id: value.id,
            text: value.text.into(),
            slug: value.slug.as_str().to_owned(),
            image: value.image.into(),
            category_id: value.category_id,
            brand_id: value.brand_id,
        }
    }
}

fn parse_create(payload: CreateSubcategoryRequest) -> Result<SubcategoryDraft, Error> {
    Ok(SubcategoryDraft {
        text: parse_text(&payload.text, TEXT)?,
        slug: parse_slug_override(payload.slug, SLUG)?,
        image: parse_image(&payload.image, IMAGE)?,
        category_id: payload.category_id,
        brand_id: payload.brand_id,
    })
}

fn parse_update(payload: UpdateSubcategoryRequest) -> Result<SubcategoryPatch, Error> {
    Ok(SubcategoryPatch {
        text: parse_optional_text(payload.text, TEXT)?,
        slug: parse_slug_override(payload.slug, SLUG)?,
        image: parse_optional_image(payload.image, IMAGE)?,
        category_id: payload.category_id,
        brand_id: payload.brand_id,
    })
}

/// List subcategories, optionally narrowed to one category.
#[utoipa::path(
    get,
    path = "/api/v1/subcategories",
    params(
        ("categoryId" = Option<i32>, Query, description = "Only subcategories of this category"),
        ("offset" = Option<i64>, Query, description = "Records to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, default and max 100")
    ),
    responses(
        (status = 200, description = "Subcategories", body = [SubcategoryResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["subcategories"],
    operation_id = "listSubcategories"
)]
#[get("/subcategories")]
pub async fn list_subcategories(
    state: web::Data<HttpState>,
    query: web::Query<CategoryListQuery>,
) -> ApiResult<web::Json<Vec<SubcategoryResponse>>> {
    let subcategories = match query.category_id {
        Some(category_id) => state.subcategories.list_by_category(category_id).await?,
        None => state.subcategories.list(query.window()).await?,
    };
    Ok(web::Json(
        subcategories
            .into_iter()
            .map(SubcategoryResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/subcategories/{id}",
    params(("id" = i32, Path, description = "Subcategory identifier")),
    responses(
        (status = 200, description = "Subcategory", body = SubcategoryResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["subcategories"],
    operation_id = "getSubcategory"
)]
#[get("/subcategories/{id}")]
pub async fn get_subcategory(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<SubcategoryResponse>> {
    let subcategory = state.subcategories.get(path.into_inner()).await?;
    Ok(web::Json(subcategory.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/subcategories/slug/{slug}",
    params(("slug" = String, Path, description = "Subcategory slug")),
    responses(
        (status = 200, description = "Subcategory", body = SubcategoryResponse),
        (status = 400, description = "Malformed slug", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["subcategories"],
    operation_id = "getSubcategoryBySlug"
)]
#[get("/subcategories/slug/{slug}")]
pub async fn get_subcategory_by_slug(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SubcategoryResponse>> {
    let slug = parse_slug(&path.into_inner(), SLUG)?;
    let subcategory = state.subcategories.get_by_slug(&slug).await?;
    Ok(web::Json(subcategory.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/subcategories",
    request_body = CreateSubcategoryRequest,
    responses(
        (status = 201, description = "Created subcategory", body = SubcategoryResponse),
        (status = 400, description = "Invalid request or unknown category", body = ErrorSchema),
        (status = 409, description = "Slug already in use", body = ErrorSchema)
    ),
    tags = ["subcategories"],
    operation_id = "createSubcategory"
)]
#[post("/subcategories")]
pub async fn create_subcategory(
    state: web::Data<HttpState>,
    payload: web::Json<CreateSubcategoryRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_create(payload.into_inner())?;
    let subcategory = state.subcategories.create(draft).await?;
    Ok(HttpResponse::Created().json(SubcategoryResponse::from(subcategory)))
}

#[utoipa::path(
    put,
    path = "/api/v1/subcategories/{id}",
    params(("id" = i32, Path, description = "Subcategory identifier")),
    request_body = UpdateSubcategoryRequest,
    responses(
        (status = 200, description = "Updated subcategory", body = SubcategoryResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Slug already in use", body = ErrorSchema)
    ),
    tags = ["subcategories"],
    operation_id = "updateSubcategory"
)]
#[put("/subcategories/{id}")]
pub async fn update_subcategory(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateSubcategoryRequest>,
) -> ApiResult<web::Json<SubcategoryResponse>> {
    let patch = parse_update(payload.into_inner())?;
    let subcategory = state.subcategories.update(path.into_inner(), patch).await?;
    Ok(web::Json(subcategory.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/subcategories/{id}",
    params(("id" = i32, Path, description = "Subcategory identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Still referenced by products", body = ErrorSchema)
    ),
    tags = ["subcategories"],
    operation_id = "deleteSubcategory"
)]
#[delete("/subcategories/{id}")]
pub async fn delete_subcategory(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.subcategories.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
