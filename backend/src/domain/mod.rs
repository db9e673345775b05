//! Catalogue domain: identifiers, entities, ports and use-cases.
//!
//! Public surface:
//! - [`Error`]: transport-agnostic error payload.
//! - [`ErrorCode`]: stable error identifier.
//! - [`TraceId`]: request-scoped correlation identifier.

pub mod catalog;
pub mod error;
pub mod identifiers;
pub mod ports;
pub mod services;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use catalog_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such product"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
