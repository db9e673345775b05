//! Product catalogue backend.
//!
//! Hexagonal layout: [`domain`] holds identifiers, catalogue types, ports
//! and services; [`inbound`] adapts HTTP onto the services; [`outbound`]
//! implements the ports over PostgreSQL or memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
