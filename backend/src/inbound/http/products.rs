//! Product HTTP handlers.
//!
//! ```text
//! GET    /api/v1/products
//! GET    /api/v1/products/{id}
//! GET    /api/v1/products/slug/{slug}
//! GET    /api/v1/products/article/{article}
//! POST   /api/v1/products
//! PUT    /api/v1/products/{id}
//! DELETE /api/v1/products/{id}
//! ```
//!
//! Products name their tags; unknown tag names are created on first use.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::catalog::{Product, ProductDraft, ProductPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::params::ListQuery;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::tags::TagResponse;
use crate::inbound::http::validation::{
    FieldName, parse_article, parse_discount, parse_images, parse_optional_article,
    parse_optional_text, parse_price, parse_slug, parse_slug_override, parse_text,
    parse_text_list,
};

const TEXT: FieldName = FieldName::new("text");
const SLUG: FieldName = FieldName::new("slug");
const ARTICLE: FieldName = FieldName::new("article");
const PRICE: FieldName = FieldName::new("price");
const DISCOUNT: FieldName = FieldName::new("discount");
const IMAGES: FieldName = FieldName::new("images");
const TAG_NAMES: FieldName = FieldName::new("tagNames");

fn default_in_stock() -> bool {
    true
}

/// Request payload for creating a product.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub text: String,
    /// Explicit slug; derived from `text` when absent or empty.
    pub slug: Option<String>,
    /// Explicit article; generated when absent or already taken.
    pub article: Option<i64>,
    pub price: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    pub small_description: Option<String>,
    pub full_description: Option<String>,
    pub subcategory_id: i32,
    pub brand_id: Option<i32>,
    pub images: Vec<String>,
    #[serde(default)]
    pub tag_names: Vec<String>,
    #[serde(default)]
    pub characteristic_ids: Vec<i32>,
}

/// Request payload for updating a product. Absent fields stay unchanged;
/// `images`, `tagNames` and `characteristicIds` replace the whole set.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub text: Option<String>,
    pub slug: Option<String>,
    pub article: Option<i64>,
    pub price: Option<f64>,
    pub discount: Option<f64>,
    pub in_stock: Option<bool>,
    pub small_description: Option<String>,
    pub full_description: Option<String>,
    pub subcategory_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub images: Option<Vec<String>>,
    pub tag_names: Option<Vec<String>>,
    pub characteristic_ids: Option<Vec<i32>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
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
    pub images: Vec<String>,
    pub tags: Vec<TagResponse>,
    pub characteristic_ids: Vec<i32>,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            text: value.text.into(),
            slug: value.slug.as_str().to_owned(),
            article: value.article.get(),
            price: value.price.get(),
            discount: value.discount.get(),
            in_stock: value.in_stock,
            small_description: value.small_description,
            full_description: value.full_description,
            subcategory_id: value.subcategory_id,
            brand_id: value.brand_id,
            images: value.images.into_inner().into_iter().map(Into::into).collect(),
            tags: value.tags.into_iter().map(TagResponse::from).collect(),
            characteristic_ids: value.characteristic_ids,
        }
    }
}

fn parse_create(payload: CreateProductRequest) -> Result<ProductDraft, Error> {
    Ok(ProductDraft {
        text: parse_text(&payload.text, TEXT)?,
        slug: parse_slug_override(payload.slug, SLUG)?,
        article: parse_optional_article(payload.article, ARTICLE)?,
        price: parse_price(payload.price, PRICE)?,
        discount: parse_discount(payload.discount, DISCOUNT)?,
        in_stock: payload.in_stock,
        small_description: payload.small_description,
        full_description: payload.full_description,
        subcategory_id: payload.subcategory_id,
        brand_id: payload.brand_id,
        images: parse_images(payload.images, IMAGES)?,
        tag_names: parse_text_list(payload.tag_names, TAG_NAMES)?,
        characteristic_ids: payload.characteristic_ids,
    })
}

fn parse_update(payload: UpdateProductRequest) -> Result<ProductPatch, Error> {
    Ok(ProductPatch {
        text: parse_optional_text(payload.text, TEXT)?,
        slug: parse_slug_override(payload.slug, SLUG)?,
        article: parse_optional_article(payload.article, ARTICLE)?,
        price: payload.price.map(|p| parse_price(p, PRICE)).transpose()?,
        discount: payload
            .discount
            .map(|d| parse_discount(d, DISCOUNT))
            .transpose()?,
        in_stock: payload.in_stock,
        small_description: payload.small_description,
        full_description: payload.full_description,
        subcategory_id: payload.subcategory_id,
        brand_id: payload.brand_id,
        images: payload
            .images
            .map(|images| parse_images(images, IMAGES))
            .transpose()?,
        tag_names: payload
            .tag_names
            .map(|names| parse_text_list(names, TAG_NAMES))
            .transpose()?,
        characteristic_ids: payload.characteristic_ids,
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(
        ("offset" = Option<i64>, Query, description = "Records to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, default and max 100")
    ),
    responses((status = 200, description = "Products", body = [ProductResponse])),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<Vec<ProductResponse>>> {
    let products = state.products.list(query.window()).await?;
    Ok(web::Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<ProductResponse>> {
    let product = state.products.get(path.into_inner()).await?;
    Ok(web::Json(product.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/slug/{slug}",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 400, description = "Malformed slug", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "getProductBySlug"
)]
#[get("/products/slug/{slug}")]
pub async fn get_product_by_slug(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProductResponse>> {
    let slug = parse_slug(&path.into_inner(), SLUG)?;
    let product = state.products.get_by_slug(&slug).await?;
    Ok(web::Json(product.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/article/{article}",
    params(("article" = i64, Path, description = "Product article")),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 400, description = "Article is not positive", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "getProductByArticle"
)]
#[get("/products/article/{article}")]
pub async fn get_product_by_article(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ProductResponse>> {
    let article = parse_article(path.into_inner(), ARTICLE)?;
    let product = state.products.get_by_article(article).await?;
    Ok(web::Json(product.into()))
}

/// Create a product.
///
/// The slug is derived from `text` and suffixed until free unless given.
/// The article is generated unless given and free.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Created product", body = ProductResponse),
        (status = 400, description = "Invalid request or unknown reference", body = ErrorSchema),
        (status = 409, description = "Slug already in use", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    payload: web::Json<CreateProductRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_create(payload.into_inner())?;
    let product = state.products.create(draft).await?;
    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

/// Update a product.
///
/// Renaming without an explicit slug regenerates the slug. An explicit
/// article held by another product is a conflict.
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product identifier")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Slug or article already in use", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "updateProduct"
)]
#[put("/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateProductRequest>,
) -> ApiResult<web::Json<ProductResponse>> {
    let patch = parse_update(payload.into_inner())?;
    let product = state.products.update(path.into_inner(), patch).await?;
    Ok(web::Json(product.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "deleteProduct"
)]
#[delete("/products/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.products.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identifiers::article::ARTICLE_RANDOM_SPAN;
    use crate::inbound::http::test_utils::{TestApp, test_app};
    use actix_web::dev::{Service, ServiceResponse};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn subcategory<S>(app: &TestApp<S>) -> i64
    where
        S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let category = app.create("/api/v1/categories", json!({"text": "Shoes"})).await;
        app.create(
            "/api/v1/subcategories",
            json!({
                "text": "Running",
                "image": "https://cdn.example.com/running.png",
                "categoryId": category
            }),
        )
        .await
    }

    fn product(text: &str, subcategory: i64) -> Value {
        json!({
            "text": text,
            "price": 120.0,
            "subcategoryId": subcategory,
            "images": ["https://cdn.example.com/p.png"],
            "tagNames": ["Беговые кроссовки", "Sale"]
        })
    }

    #[rstest]
    #[actix_web::test]
    async fn create_derives_identifiers_and_tags() {
        let app = test_app().await;
        let sub = subcategory(&app).await;

        let res = app
            .post("/api/v1/products", product("Air Runner 2", sub))
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: ProductResponse = test::read_body_json(res).await;

        assert_eq!(body.slug, "air-runner-2");
        assert!(body.in_stock);
        assert_eq!(body.discount, 0.0);
        let date_part = 260_102 * ARTICLE_RANDOM_SPAN;
        assert!((date_part..date_part + ARTICLE_RANDOM_SPAN).contains(&body.article));
        let values: Vec<&str> = body.tags.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, ["begovye_krossovki", "sale"]);
    }

    #[rstest]
    #[actix_web::test]
    async fn product_is_reachable_by_slug_and_article() {
        let app = test_app().await;
        let sub = subcategory(&app).await;
        let mut payload = product("Air Runner", sub);
        payload["article"] = json!(777);
        app.create("/api/v1/products", payload).await;

        let by_slug = app.get("/api/v1/products/slug/air-runner").await;
        assert_eq!(by_slug.status(), StatusCode::OK);
        let by_article = app.get("/api/v1/products/article/777").await;
        let body: ProductResponse = test::read_body_json(by_article).await;
        assert_eq!(body.slug, "air-runner");
    }

    #[rstest]
    #[actix_web::test]
    async fn colliding_article_on_create_is_replaced() {
        let app = test_app().await;
        let sub = subcategory(&app).await;
        let mut first = product("First", sub);
        first["article"] = json!(777);
        let mut second = product("Second", sub);
        second["article"] = json!(777);
        app.create("/api/v1/products", first).await;

        let res = app.post("/api/v1/products", second).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: ProductResponse = test::read_body_json(res).await;
        assert_ne!(body.article, 777);
    }

    #[rstest]
    #[actix_web::test]
    async fn colliding_article_on_update_is_a_conflict() {
        let app = test_app().await;
        let sub = subcategory(&app).await;
        let mut first = product("First", sub);
        first["article"] = json!(777);
        app.create("/api/v1/products", first).await;
        let second = app.create("/api/v1/products", product("Second", sub)).await;

        let res = app
            .put(&format!("/api/v1/products/{second}"), json!({"article": 777}))
            .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "article");
    }

    #[rstest]
    #[case(json!({"images": []}), "invalid_image_count")]
    #[case(json!({"price": -1.0}), "invalid_price")]
    #[case(json!({"discount": 101.0}), "invalid_discount")]
    #[case(json!({"article": 0}), "invalid_article")]
    #[actix_web::test]
    async fn invalid_fields_are_rejected(#[case] overrides: Value, #[case] code: &str) {
        let app = test_app().await;
        let sub = subcategory(&app).await;
        let mut payload = product("Air Runner", sub);
        for (key, value) in overrides.as_object().into_iter().flatten() {
            payload[key] = value.clone();
        }

        let res = app.post("/api/v1/products", payload).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], code);
    }

    #[rstest]
    #[actix_web::test]
    async fn unchanged_text_keeps_slug() {
        let app = test_app().await;
        let sub = subcategory(&app).await;
        let id = app.create("/api/v1/products", product("Air Runner", sub)).await;

        let res = app
            .put(
                &format!("/api/v1/products/{id}"),
                json!({"text": "Air Runner", "price": 99.5}),
            )
            .await;
        let body: ProductResponse = test::read_body_json(res).await;
        assert_eq!(body.slug, "air-runner");
        assert_eq!(body.price, 99.5);
    }

    #[rstest]
    #[actix_web::test]
    async fn non_positive_article_path_is_rejected() {
        let app = test_app().await;
        let res = app.get("/api/v1/products/article/0").await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
