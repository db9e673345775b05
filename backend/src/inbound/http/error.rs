//! Rendering of domain errors as catalogue API responses.
//!
//! Client-caused failures (`invalid_request`, `not_found`, `conflict`) are
//! returned verbatim with their details so callers can tell which field or
//! identifier was at fault. Server-side failures are logged in full and
//! answered with a generic message that keeps only the trace id.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{debug, error, warn};

pub use crate::domain::ApiResult;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

const REDACTED_MESSAGE: &str = "Internal server error";

impl ErrorCode {
    /// HTTP status the API answers with for this code.
    pub(crate) const fn http_status(self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Body sent to the client for `error`.
fn public_body(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    let body = Error::internal(REDACTED_MESSAGE);
    match error.trace_id() {
        Some(id) => body.with_trace_id(id),
        None => body,
    }
}

fn log_failure(error: &Error) {
    let trace_id = error.trace_id().unwrap_or("-");
    match error.code() {
        ErrorCode::InternalError => {
            error!(trace_id, message = error.message(), details = ?error.details(), "request failed");
        }
        ErrorCode::Conflict => debug!(
            trace_id,
            field = error.field(),
            detail = error.detail_code(),
            message = error.message(),
            "request conflicts with catalogue state"
        ),
        ErrorCode::ServiceUnavailable => {
            warn!(trace_id, message = error.message(), "catalogue storage unavailable");
        }
        code => debug!(trace_id, ?code, message = error.message(), "request rejected"),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        self.code().http_status()
    }

    fn error_response(&self) -> HttpResponse {
        log_failure(self);
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id));
        }
        response.json(public_body(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error surfaced through a handler");
        Error::internal(REDACTED_MESSAGE)
    }
}

#[cfg(test)]
mod tests;
