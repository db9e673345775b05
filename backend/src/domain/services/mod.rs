//! Catalogue use-cases.
//!
//! Services resolve identifiers, call storage ports and translate port
//! failures into domain [`Error`]s. Writes that trip a unique constraint are
//! retried once with freshly resolved identifiers.

use std::future::Future;

use serde_json::json;
use tracing::{info, warn};

use crate::domain::Error;
use crate::domain::identifiers::ResolveError;
use crate::domain::ports::{CatalogRepositoryError, constraints};

mod brands;
mod categories;
mod characteristics;
mod filters;
mod identifiers;
mod products;
mod subcategories;
mod tags;

pub use brands::BrandService;
pub use categories::CategoryService;
pub use characteristics::CharacteristicService;
pub use filters::FilterService;
pub use identifiers::IdentifierResolver;
pub use products::ProductService;
pub use subcategories::SubcategoryService;
pub use tags::TagService;

/// JSON field a storage constraint protects.
pub(crate) fn field_for_constraint(constraint: &str) -> &'static str {
    match constraint {
        constraints::CATEGORY_SLUG | constraints::SUBCATEGORY_SLUG | constraints::PRODUCT_SLUG => {
            "slug"
        }
        constraints::PRODUCT_ARTICLE => "article",
        constraints::TAG_NAME | constraints::TEMPLATE_NAME => "name",
        constraints::TAG_VALUE => "value",
        constraints::SUBCATEGORY_CATEGORY | constraints::FILTER_CATEGORY => "categoryId",
        constraints::SUBCATEGORY_BRAND | constraints::PRODUCT_BRAND => "brandId",
        constraints::PRODUCT_SUBCATEGORY => "subcategoryId",
        constraints::PRODUCT_TAG => "tagNames",
        constraints::PRODUCT_CHARACTERISTIC_ITEM => "characteristicIds",
        other => {
            warn!(constraint = other, "unrecognised constraint name");
            "unknown"
        }
    }
}

/// Map storage failures into domain errors.
pub(crate) fn map_repository_error(error: CatalogRepositoryError) -> Error {
    match error {
        CatalogRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalogue storage unavailable: {message}"))
        }
        CatalogRepositoryError::Query { message } => {
            Error::internal(format!("catalogue storage error: {message}"))
        }
        CatalogRepositoryError::UniqueViolation { constraint } => {
            let field = field_for_constraint(&constraint);
            Error::conflict(format!("{field} is already in use")).with_details(json!({
                "field": field,
                "constraint": constraint,
                "code": "duplicate",
            }))
        }
        CatalogRepositoryError::MissingReference { constraint } => {
            let field = field_for_constraint(&constraint);
            Error::invalid_request(format!("{field} references a record that does not exist"))
                .with_details(json!({
                    "field": field,
                    "code": "unknown_reference",
                }))
        }
        CatalogRepositoryError::StillReferenced { constraint } => {
            Error::conflict("record is still referenced by other records").with_details(json!({
                "constraint": constraint,
                "code": "still_referenced",
            }))
        }
    }
}

/// Map a failed uniqueness resolution for `field`.
pub(crate) fn map_resolve_error(field: &str, error: ResolveError<CatalogRepositoryError>) -> Error {
    match error {
        ResolveError::Exhausted { attempts } => {
            Error::conflict(format!("no free {field} found after {attempts} attempts"))
                .with_details(json!({
                    "field": field,
                    "attempts": attempts,
                    "code": "identifier_exhausted",
                }))
        }
        ResolveError::Lookup(error) => map_repository_error(error),
    }
}

/// Conflict raised when an explicitly requested identifier is held.
pub(crate) fn identifier_taken(field: &str, value: &str) -> Error {
    Error::conflict(format!("{field} '{value}' is already in use")).with_details(json!({
        "field": field,
        "value": value,
        "code": "identifier_taken",
    }))
}

pub(crate) fn not_found(entity: &str, id: i32) -> Error {
    Error::not_found(format!("{entity} {id} not found"))
}

/// Run `attempt` and repeat it once if storage reports a unique violation.
///
/// `attempt` resolves identifiers (failing with a domain error) and then
/// performs the write (failing with a storage error). Resolving again on the
/// second run picks up the row that won the race.
pub(crate) async fn write_with_retry<T, F, Fut>(operation: &'static str, mut attempt: F) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Result<T, CatalogRepositoryError>, Error>>,
{
    match attempt().await? {
        Ok(value) => Ok(value),
        Err(CatalogRepositoryError::UniqueViolation { constraint }) => {
            info!(operation, %constraint, "unique violation on write; resolving identifiers again");
            attempt().await?.map_err(map_repository_error)
        }
        Err(error) => Err(map_repository_error(error)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case(CatalogRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(CatalogRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(CatalogRepositoryError::unique_violation(constraints::PRODUCT_SLUG), ErrorCode::Conflict)]
    #[case(
        CatalogRepositoryError::missing_reference(constraints::PRODUCT_SUBCATEGORY),
        ErrorCode::InvalidRequest
    )]
    #[case(
        CatalogRepositoryError::still_referenced(constraints::SUBCATEGORY_CATEGORY),
        ErrorCode::Conflict
    )]
    fn repository_errors_map_to_codes(
        #[case] error: CatalogRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_repository_error(error).code(), expected);
    }

    #[rstest]
    fn unique_violation_details_name_the_field() {
        let error = map_repository_error(CatalogRepositoryError::unique_violation(
            constraints::PRODUCT_ARTICLE,
        ));
        let details = error.details().expect("details present");
        assert_eq!(details["field"], "article");
        assert_eq!(details["code"], "duplicate");
    }

    #[rstest]
    fn exhaustion_maps_to_conflict() {
        let error = map_resolve_error("slug", ResolveError::Exhausted { attempts: 256 });
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(
            error.details().expect("details present")["code"],
            "identifier_exhausted"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn retries_once_after_unique_violation() {
        let calls = AtomicU32::new(0);
        let result = write_with_retry("test write", || {
            let call = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if call == 0 {
                    Ok(Err(CatalogRepositoryError::unique_violation(constraints::CATEGORY_SLUG)))
                } else {
                    Ok(Ok(call))
                }
            }
        })
        .await;

        assert_eq!(result.expect("second attempt succeeds"), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn second_violation_becomes_conflict() {
        let calls = AtomicU32::new(0);
        let result: Result<(), Error> = write_with_retry("test write", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(Err(CatalogRepositoryError::unique_violation(constraints::CATEGORY_SLUG))) }
        })
        .await;

        assert_eq!(result.expect_err("conflict").code(), ErrorCode::Conflict);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn other_storage_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), Error> = write_with_retry("test write", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(Err(CatalogRepositoryError::connection("refused"))) }
        })
        .await;

        assert_eq!(
            result.expect_err("unavailable").code(),
            ErrorCode::ServiceUnavailable
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
