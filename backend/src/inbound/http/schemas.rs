//! OpenAPI descriptions of the error body.
//!
//! The domain error types stay free of `utoipa`; these mirrors register under
//! the domain names so generated clients see one `Error` model.

use utoipa::ToSchema;

/// Machine-readable failure class.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Malformed payload, failed field validation or unknown reference.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "not_found")]
    NotFound,
    /// Identifier taken or exhausted, or record still referenced.
    #[schema(rename = "conflict")]
    Conflict,
    /// Catalogue storage cannot be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Shape of `details` on validation and conflict errors. Every key is
/// optional; which ones appear depends on `code`.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorDetails)]
#[expect(dead_code, reason = "schema-only mirror")]
pub struct ErrorDetailsSchema {
    /// Request field at fault, in camelCase.
    #[schema(example = "slug")]
    field: Option<String>,
    /// Detail code such as `duplicate`, `identifier_taken`,
    /// `identifier_exhausted`, `unknown_reference` or `still_referenced`.
    #[schema(example = "identifier_taken")]
    code: Option<String>,
    /// Explicit identifier that was rejected.
    #[schema(example = "running-shoes")]
    value: Option<String>,
    /// Storage constraint that fired.
    #[schema(example = "products_slug_key")]
    constraint: Option<String>,
    /// Candidates tried before resolution gave up.
    #[schema(example = 256)]
    attempts: Option<u32>,
}

/// Body of every non-2xx catalogue response.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(dead_code, reason = "schema-only mirror")]
pub struct ErrorSchema {
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    #[schema(example = "slug 'running-shoes' is already in use")]
    message: String,
    /// Same value as the `trace-id` response header.
    #[schema(rename = "traceId", example = "3f2504e0-4f89-41d3-9a0c-0305e82c3301")]
    trace_id: Option<String>,
    details: Option<ErrorDetailsSchema>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::Value;
    use utoipa::PartialSchema;

    fn schema_json<T: PartialSchema>() -> Value {
        serde_json::to_value(T::schema()).expect("schema serialises")
    }

    #[rstest]
    fn error_registers_under_domain_name() {
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        let properties = &schema_json::<ErrorSchema>()["properties"];
        for key in ["code", "message", "traceId", "details"] {
            assert!(properties.get(key).is_some(), "missing {key}");
        }
    }

    #[rstest]
    fn details_list_conflict_keys() {
        let properties = &schema_json::<ErrorDetailsSchema>()["properties"];
        for key in ["field", "code", "value", "constraint", "attempts"] {
            assert!(properties.get(key).is_some(), "missing {key}");
        }
    }

    #[rstest]
    fn codes_use_snake_case() {
        let rendered = schema_json::<ErrorCodeSchema>().to_string();
        for code in ["invalid_request", "not_found", "conflict", "service_unavailable", "internal_error"] {
            assert!(rendered.contains(code), "missing {code}");
        }
    }
}
