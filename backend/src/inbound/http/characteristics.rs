//! Characteristic template HTTP handlers.
//!
//! ```text
//! GET    /api/v1/characteristics
//! GET    /api/v1/characteristics/{id}
//! POST   /api/v1/characteristics
//! PUT    /api/v1/characteristics/{id}
//! DELETE /api/v1/characteristics/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::catalog::{
    CharacteristicItem, CharacteristicItemDraft, CharacteristicTemplate,
    CharacteristicTemplateDraft, CharacteristicTemplatePatch,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::params::ListQuery;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_text, parse_text};

const NAME: FieldName = FieldName::new("name");
const ITEM_NAME: FieldName = FieldName::new("items.name");

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CharacteristicItemRequest {
    pub name: String,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharacteristicRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<CharacteristicItemRequest>,
}

/// Absent fields stay unchanged; `items` replaces the whole item list.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCharacteristicRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub items: Option<Vec<CharacteristicItemRequest>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CharacteristicItemResponse {
    pub id: i32,
    pub name: String,
    pub label: String,
    pub value: String,
}

impl From<CharacteristicItem> for CharacteristicItemResponse {
    fn from(value: CharacteristicItem) -> Self {
        Self {
            id: value.id,
            name: value.name.into(),
            label: value.label,
            value: value.value,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CharacteristicResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<CharacteristicItemResponse>,
}

impl From<CharacteristicTemplate> for CharacteristicResponse {
    fn from(value: CharacteristicTemplate) -> Self {
        Self {
            id: value.id,
            name: value.name.into(),
            description: value.description,
            items: value
                .items
                .into_iter()
                .map(CharacteristicItemResponse::from)
                .collect(),
        }
    }
}

fn parse_items(items: Vec<CharacteristicItemRequest>) -> Result<Vec<CharacteristicItemDraft>, Error> {
    items
        .into_iter()
        .map(|item| {
            Ok(CharacteristicItemDraft {
                name: parse_text(&item.name, ITEM_NAME)?,
                label: item.label,
                value: item.value,
            })
        })
        .collect()
}

fn parse_create(payload: CreateCharacteristicRequest) -> Result<CharacteristicTemplateDraft, Error> {
    Ok(CharacteristicTemplateDraft {
        name: parse_text(&payload.name, NAME)?,
        description: payload.description,
        items: parse_items(payload.items)?,
    })
}

fn parse_update(payload: UpdateCharacteristicRequest) -> Result<CharacteristicTemplatePatch, Error> {
    Ok(CharacteristicTemplatePatch {
        name: parse_optional_text(payload.name, NAME)?,
        description: payload.description,
        items: payload.items.map(parse_items).transpose()?,
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/characteristics",
    params(
        ("offset" = Option<i64>, Query, description = "Records to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, default and max 100")
    ),
    responses((status = 200, description = "Characteristic templates", body = [CharacteristicResponse])),
    tags = ["characteristics"],
    operation_id = "listCharacteristics"
)]
#[get("/characteristics")]
pub async fn list_characteristics(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<Vec<CharacteristicResponse>>> {
    let templates = state.characteristics.list(query.window()).await?;
    Ok(web::Json(
        templates
            .into_iter()
            .map(CharacteristicResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/characteristics/{id}",
    params(("id" = i32, Path, description = "Template identifier")),
    responses(
        (status = 200, description = "Characteristic template", body = CharacteristicResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["characteristics"],
    operation_id = "getCharacteristic"
)]
#[get("/characteristics/{id}")]
pub async fn get_characteristic(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<CharacteristicResponse>> {
    let template = state.characteristics.get(path.into_inner()).await?;
    Ok(web::Json(template.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/characteristics",
    request_body = CreateCharacteristicRequest,
    responses(
        (status = 201, description = "Created template", body = CharacteristicResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Name already in use", body = ErrorSchema)
    ),
    tags = ["characteristics"],
    operation_id = "createCharacteristic"
)]
#[post("/characteristics")]
pub async fn create_characteristic(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCharacteristicRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_create(payload.into_inner())?;
    let template = state.characteristics.create(draft).await?;
    Ok(HttpResponse::Created().json(CharacteristicResponse::from(template)))
}

#[utoipa::path(
    put,
    path = "/api/v1/characteristics/{id}",
    params(("id" = i32, Path, description = "Template identifier")),
    request_body = UpdateCharacteristicRequest,
    responses(
        (status = 200, description = "Updated template", body = CharacteristicResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Name already in use", body = ErrorSchema)
    ),
    tags = ["characteristics"],
    operation_id = "updateCharacteristic"
)]
#[put("/characteristics/{id}")]
pub async fn update_characteristic(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateCharacteristicRequest>,
) -> ApiResult<web::Json<CharacteristicResponse>> {
    let patch = parse_update(payload.into_inner())?;
    let template = state
        .characteristics
        .update(path.into_inner(), patch)
        .await?;
    Ok(web::Json(template.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/characteristics/{id}",
    params(("id" = i32, Path, description = "Template identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Items still linked to products", body = ErrorSchema)
    ),
    tags = ["characteristics"],
    operation_id = "deleteCharacteristic"
)]
#[delete("/characteristics/{id}")]
pub async fn delete_characteristic(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.characteristics.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
