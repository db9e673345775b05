//! Bootstrap tests: the server binds and reports ready without a database.

use super::server::{ServerConfig, create_server};
use actix_web::web;
use catalog_backend::domain::identifiers::RetryPolicy;
use catalog_backend::inbound::http::health::HealthState;
use rstest::{fixture, rstest};
use std::net::SocketAddr;

#[fixture]
fn ephemeral_config() -> ServerConfig {
    ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)))
        .with_identifier_policy(RetryPolicy::new(8))
}

#[rstest]
#[actix_rt::test]
async fn binding_marks_the_memory_store_ready(ephemeral_config: ServerConfig) {
    let health = web::Data::new(HealthState::new());
    assert_eq!(health.storage(), None);

    let _server = create_server(health.clone(), ephemeral_config)
        .expect("server builds without a database");

    assert!(health.is_ready());
    assert_eq!(health.storage(), Some("memory"));
}

#[rstest]
#[actix_rt::test]
async fn occupied_port_is_an_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe socket");
    let taken = listener.local_addr().expect("probe address");
    let health = web::Data::new(HealthState::new());

    let config = ServerConfig::new(taken).with_identifier_policy(RetryPolicy::new(8));
    assert!(create_server(health.clone(), config).is_err());
    assert!(!health.is_ready());
}
