//! Category HTTP handlers.
//!
//! ```text
//! GET    /api/v1/categories
//! GET    /api/v1/categories/{id}
//! GET    /api/v1/categories/slug/{slug}
//! POST   /api/v1/categories
//! PUT    /api/v1/categories/{id}
//! DELETE /api/v1/categories/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::catalog::{Category, CategoryDraft, CategoryPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::params::ListQuery;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_optional_image, parse_optional_text, parse_slug, parse_slug_override,
    parse_text,
};

const TEXT: FieldName = FieldName::new("text");
const SLUG: FieldName = FieldName::new("slug");
const ICON: FieldName = FieldName::new("icon");

/// Request payload for creating a category.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub text: String,
    /// Explicit slug; derived from `text` when absent or empty.
    pub slug: Option<String>,
    pub icon: Option<String>,
}

/// Request payload for updating a category. Absent fields stay unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub text: Option<String>,
    /// Explicit slug. When absent or empty, a changed `text` regenerates it.
    pub slug: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i32,
    pub text: String,
    pub slug: String,
    pub icon: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(value: Category) -> Self {
        Self {
            id: value.id,
            text: value.text.into(),
            slug: value.slug.as_str().to_owned(),
            icon: value.icon.map(Into::into),
        }
    }
}

fn parse_create(payload: CreateCategoryRequest) -> Result<CategoryDraft, Error> {
    Ok(CategoryDraft {
        text: parse_text(&payload.text, TEXT)?,
        slug: parse_slug_override(payload.slug, SLUG)?,
        icon: parse_optional_image(payload.icon, ICON)?,
    })
}

fn parse_update(payload: UpdateCategoryRequest) -> Result<CategoryPatch, Error> {
    Ok(CategoryPatch {
        text: parse_optional_text(payload.text, TEXT)?,
        slug: parse_slug_override(payload.slug, SLUG)?,
        icon: parse_optional_image(payload.icon, ICON)?,
    })
}

/// List categories.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    params(
        ("offset" = Option<i64>, Query, description = "Records to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, default and max 100")
    ),
    responses(
        (status = 200, description = "Categories", body = [CategoryResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<Vec<CategoryResponse>>> {
    let categories = state.categories.list(query.window()).await?;
    Ok(web::Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// Fetch a category by id.
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(("id" = i32, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category", body = CategoryResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "getCategory"
)]
#[get("/categories/{id}")]
pub async fn get_category(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<CategoryResponse>> {
    let category = state.categories.get(path.into_inner()).await?;
    Ok(web::Json(category.into()))
}

/// Fetch a category by slug.
#[utoipa::path(
    get,
    path = "/api/v1/categories/slug/{slug}",
    params(("slug" = String, Path, description = "Category slug")),
    responses(
        (status = 200, description = "Category", body = CategoryResponse),
        (status = 400, description = "Malformed slug", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "getCategoryBySlug"
)]
#[get("/categories/slug/{slug}")]
pub async fn get_category_by_slug(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CategoryResponse>> {
    let slug = parse_slug(&path.into_inner(), SLUG)?;
    let category = state.categories.get_by_slug(&slug).await?;
    Ok(web::Json(category.into()))
}

/// Create a category, deriving a unique slug from its text when none is
/// given.
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Created category", body = CategoryResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Slug already in use", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCategoryRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_create(payload.into_inner())?;
    let category = state.categories.create(draft).await?;
    Ok(HttpResponse::Created().json(CategoryResponse::from(category)))
}

/// Update a category.
#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(("id" = i32, Path, description = "Category identifier")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Updated category", body = CategoryResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Slug already in use", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "updateCategory"
)]
#[put("/categories/{id}")]
pub async fn update_category(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateCategoryRequest>,
) -> ApiResult<web::Json<CategoryResponse>> {
    let patch = parse_update(payload.into_inner())?;
    let category = state.categories.update(path.into_inner(), patch).await?;
    Ok(web::Json(category.into()))
}

/// Delete a category. Fails while subcategories or filters reference it.
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = i32, Path, description = "Category identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Still referenced", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "deleteCategory"
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.categories.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::inbound::http::test_utils::test_app;
    use actix_web::http::StatusCode;
    use actix_web::test::{self};
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    fn blank_text_is_rejected_before_the_service() {
        let err = parse_create(CreateCategoryRequest {
            text: "  ".to_owned(),
            slug: None,
            icon: None,
        })
        .expect_err("blank text");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details().expect("details")["field"], "text");
    }

    #[rstest]
    #[actix_web::test]
    async fn create_derives_slug_and_returns_201() {
        let app = test_app().await;
        let res = app
            .post("/api/v1/categories", json!({"text": "Беговые кроссовки"}))
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: CategoryResponse = test::read_body_json(res).await;
        assert_eq!(body.slug, "begovye-krossovki");
    }

    #[rstest]
    #[actix_web::test]
    async fn duplicate_text_gets_numbered_slug() {
        let app = test_app().await;
        app.post("/api/v1/categories", json!({"text": "Shoes"})).await;
        let res = app.post("/api/v1/categories", json!({"text": "Shoes"})).await;
        let body: CategoryResponse = test::read_body_json(res).await;
        assert_eq!(body.slug, "shoes-1");
    }

    #[rstest]
    #[actix_web::test]
    async fn explicit_slug_held_elsewhere_is_a_conflict() {
        let app = test_app().await;
        app.post("/api/v1/categories", json!({"text": "Shoes"})).await;
        let res = app
            .post("/api/v1/categories", json!({"text": "Boots", "slug": "shoes"}))
            .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "conflict");
        assert_eq!(body["details"]["field"], "slug");
    }

    #[rstest]
    #[actix_web::test]
    async fn renaming_regenerates_the_slug() {
        let app = test_app().await;
        let created: CategoryResponse =
            test::read_body_json(app.post("/api/v1/categories", json!({"text": "Shoes"})).await)
                .await;
        let res = app
            .put(
                &format!("/api/v1/categories/{}", created.id),
                json!({"text": "Trail shoes"}),
            )
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: CategoryResponse = test::read_body_json(res).await;
        assert_eq!(body.slug, "trail-shoes");

        let res = app.get("/api/v1/categories/slug/trail-shoes").await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_category_is_404_and_delete_is_204() {
        let app = test_app().await;
        assert_eq!(
            app.get("/api/v1/categories/42").await.status(),
            StatusCode::NOT_FOUND
        );
        let created: CategoryResponse =
            test::read_body_json(app.post("/api/v1/categories", json!({"text": "Hats"})).await)
                .await;
        let res = app
            .delete(&format!("/api/v1/categories/{}", created.id))
            .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
