//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::Value;

use crate::Trace;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::{configure_api, json_config};
use crate::outbound::memory::InMemoryCatalog;
use crate::test_support::FixtureClock;

/// Initialised catalogue app over an empty in-memory store.
pub(crate) struct TestApp<S> {
    service: S,
}

impl<S> TestApp<S>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    pub(crate) async fn get(&self, uri: &str) -> ServiceResponse {
        let req = test::TestRequest::get().uri(uri).to_request();
        test::call_service(&self.service, req).await
    }

    pub(crate) async fn post(&self, uri: &str, body: Value) -> ServiceResponse {
        let req = test::TestRequest::post().uri(uri).set_json(body).to_request();
        test::call_service(&self.service, req).await
    }

    pub(crate) async fn put(&self, uri: &str, body: Value) -> ServiceResponse {
        let req = test::TestRequest::put().uri(uri).set_json(body).to_request();
        test::call_service(&self.service, req).await
    }

    pub(crate) async fn delete(&self, uri: &str) -> ServiceResponse {
        let req = test::TestRequest::delete().uri(uri).to_request();
        test::call_service(&self.service, req).await
    }

    /// POST `body` and decode the created entity's `id`.
    pub(crate) async fn create(&self, uri: &str, body: Value) -> i64 {
        let res = self.post(uri, body).await;
        assert!(res.status().is_success(), "create {uri} failed: {}", res.status());
        let created: Value = test::read_body_json(res).await;
        created["id"].as_i64().expect("created entity has an id")
    }
}

/// Build the `/api/v1` app over a fresh [`InMemoryCatalog`] and a fixed
/// clock.
pub(crate) async fn test_app() -> TestApp<
    impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
> {
    let ports = HttpStatePorts::shared(Arc::new(InMemoryCatalog::new()));
    let state = HttpState::new(ports, Arc::new(FixtureClock::default()), |resolver| resolver);
    let service = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(configure_api)),
    )
    .await;
    TestApp { service }
}
