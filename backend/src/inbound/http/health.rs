//! Orchestrator probes.
//!
//! `/health/live` answers as long as the process can serve HTTP.
//! `/health/ready` stays 503 until the server has bound its socket with its
//! storage backend wired, then reports which backend is in use.

use std::sync::OnceLock;

use actix_web::{HttpResponse, HttpResponseBuilder, get, http::header, web};
use serde::Serialize;

/// Readiness shared between the bootstrap code and the probe handlers.
#[derive(Debug, Default)]
pub struct HealthState {
    storage: OnceLock<&'static str>,
}

#[derive(Debug, Serialize)]
struct ProbeBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    storage: Option<&'static str>,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the storage backend and start reporting ready. Later calls are
    /// ignored.
    pub fn mark_ready(&self, storage: &'static str) {
        let _ = self.storage.set(storage);
    }

    pub fn is_ready(&self) -> bool {
        self.storage.get().is_some()
    }

    /// Backend label recorded by [`HealthState::mark_ready`].
    pub fn storage(&self) -> Option<&'static str> {
        self.storage.get().copied()
    }
}

fn probe(mut response: HttpResponseBuilder, body: ProbeBody) -> HttpResponse {
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(body)
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Serving catalogue traffic"),
        (status = 503, description = "Still starting")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    match state.storage() {
        Some(storage) => probe(
            HttpResponse::Ok(),
            ProbeBody {
                status: "ready",
                storage: Some(storage),
            },
        ),
        None => probe(
            HttpResponse::ServiceUnavailable(),
            ProbeBody {
                status: "starting",
                storage: None,
            },
        ),
    }
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses((status = 200, description = "Process is serving HTTP"))
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    probe(
        HttpResponse::Ok(),
        ProbeBody {
            status: "alive",
            storage: None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn get(state: web::Data<HealthState>, uri: &str) -> (StatusCode, Value) {
        let app = test::init_service(App::new().app_data(state).service(ready).service(live)).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = res.status();
        assert_eq!(
            res.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
        (status, test::read_body_json(res).await)
    }

    #[rstest]
    #[actix_web::test]
    async fn ready_reports_storage_once_marked() {
        let state = web::Data::new(HealthState::new());
        let (status, body) = get(state.clone(), "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, json!({"status": "starting"}));

        state.mark_ready("postgres");
        state.mark_ready("memory");
        let (status, body) = get(state, "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ready", "storage": "postgres"}));
    }

    #[rstest]
    #[actix_web::test]
    async fn live_answers_before_ready() {
        let (status, body) = get(web::Data::new(HealthState::new()), "/health/live").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "alive");
    }
}
