//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, Storage};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};

use catalog_backend::Trace;
use catalog_backend::domain::Error;
#[cfg(debug_assertions)]
use catalog_backend::doc::ApiDoc;
use catalog_backend::inbound::http::health::{HealthState, live, ready};
use catalog_backend::inbound::http::state::HttpState;
use catalog_backend::inbound::http::{configure_api, json_config};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Shared state handed to every worker's `App`.
#[derive(Clone)]
struct CatalogApp {
    health: web::Data<HealthState>,
    catalog: web::Data<HttpState>,
}

/// JSON 404 for paths outside the routed API.
async fn unknown_route(req: HttpRequest) -> Result<HttpResponse, Error> {
    Err(Error::not_found(format!(
        "no route for {} {}",
        req.method(),
        req.path()
    )))
}

impl CatalogApp {
    fn into_app(
        self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let app = App::new()
            .app_data(self.health)
            .app_data(self.catalog)
            .app_data(json_config())
            .wrap(Trace)
            .service(ready)
            .service(live)
            .service(web::scope("/api/v1").configure(configure_api));

        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );

        app.default_service(web::to(unknown_route))
    }
}

/// Bind `config.bind_addr` and start serving the catalogue.
///
/// `health_state` reports ready, naming the storage backend, once the socket
/// is bound.
///
/// # Errors
/// The bind error when the address is unavailable.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let shared = CatalogApp {
        health: health_state.clone(),
        catalog: build_http_state(&config),
    };

    let server = HttpServer::new(move || shared.clone().into_app())
        .bind(config.bind_addr)?
        .run();

    health_state.mark_ready(config.storage().label());
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use std::net::SocketAddr;

    fn memory_app() -> CatalogApp {
        let health = web::Data::new(HealthState::new());
        health.mark_ready("memory");
        CatalogApp {
            health,
            catalog: build_http_state(&ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)))),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_paths_get_a_json_not_found() {
        let app = test::init_service(memory_app().into_app()).await;
        let req = test::TestRequest::get().uri("/api/v2/products").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert!(res.headers().contains_key("trace-id"));
        let body: Error = test::read_body_json(res).await;
        assert_eq!(body.message(), "no route for GET /api/v2/products");
    }

    #[rstest]
    #[actix_web::test]
    async fn api_routes_are_mounted_under_v1() {
        let app = test::init_service(memory_app().into_app()).await;
        let req = test::TestRequest::get().uri("/api/v1/categories").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}
