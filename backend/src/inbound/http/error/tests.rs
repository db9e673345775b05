//! Status mapping, redaction and headers of rendered errors.

use super::*;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::json;

const REQUEST_ID: &str = "3f2504e0-4f89-41d3-9a0c-0305e82c3301";

struct Rendered {
    status: StatusCode,
    trace_header: Option<String>,
    body: Error,
}

async fn render(error: &Error) -> Rendered {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace_header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body()).await.expect("body readable");
    let body = serde_json::from_slice(&bytes).expect("error json");
    Rendered {
        status,
        trace_header,
        body,
    }
}

#[fixture]
fn leaked_dsn() -> Error {
    Error::internal("catalogue storage error: password authentication failed for postgres://catalog:secret@db")
        .with_trace_id(REQUEST_ID)
        .with_details(json!({ "constraint": "products_pkey" }))
}

#[fixture]
fn article_conflict() -> Error {
    Error::conflict("article '260102123' is already in use")
        .with_trace_id(REQUEST_ID)
        .with_details(json!({ "field": "article", "value": "260102123", "code": "identifier_taken" }))
}

#[rstest]
#[case(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
#[case(ErrorCode::Conflict, StatusCode::CONFLICT)]
#[case(ErrorCode::ServiceUnavailable, StatusCode::SERVICE_UNAVAILABLE)]
#[case(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
fn each_code_has_a_status(#[case] code: ErrorCode, #[case] status: StatusCode) {
    assert_eq!(code.http_status(), status);
}

#[rstest]
#[actix_web::test]
async fn internal_failures_hide_message_and_details(leaked_dsn: Error) {
    let rendered = render(&leaked_dsn).await;
    assert_eq!(rendered.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(rendered.trace_header.as_deref(), Some(REQUEST_ID));
    assert_eq!(rendered.body.message(), REDACTED_MESSAGE);
    assert_eq!(rendered.body.trace_id(), Some(REQUEST_ID));
    assert!(rendered.body.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn conflicts_name_the_field(article_conflict: Error) {
    let rendered = render(&article_conflict).await;
    assert_eq!(rendered.status, StatusCode::CONFLICT);
    assert_eq!(rendered.body, article_conflict);
    assert_eq!(rendered.body.field(), Some("article"));
}

#[rstest]
#[actix_web::test]
async fn no_trace_header_without_a_trace_id() {
    let error = Error::invalid_request("text must not be empty").with_details(json!({"field": "text"}));
    let rendered = render(&error).await;
    assert_eq!(rendered.status, StatusCode::BAD_REQUEST);
    assert_eq!(rendered.trace_header, None);
    assert_eq!(rendered.body.field(), Some("text"));
}

#[rstest]
fn storage_outage_keeps_its_message() {
    let error = Error::service_unavailable("catalogue storage unavailable: refused");
    assert_eq!(public_body(&error), error);
}

#[rstest]
fn framework_errors_become_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("payload overflow").into();
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), REDACTED_MESSAGE);
    assert!(err.details().is_none());
}
