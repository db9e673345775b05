//! Diesel and pool error mapping into [`CatalogRepositoryError`].
//!
//! PostgreSQL reports the violated constraint by name; the name is carried
//! through so services can attribute the failure to a field.

use std::fmt::Display;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::CatalogRepositoryError;

use super::pool::PoolError;

/// Map pool errors into connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> CatalogRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CatalogRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors raised by reads, inserts and updates.
///
/// Foreign key violations here mean the written row references a missing
/// record.
pub(crate) fn map_diesel_error(error: DieselError) -> CatalogRepositoryError {
    map_with(error, |constraint| {
        CatalogRepositoryError::missing_reference(constraint)
    })
}

/// Map Diesel errors raised by deletes.
///
/// Foreign key violations here mean other rows still reference the record.
pub(crate) fn map_delete_error(error: DieselError) -> CatalogRepositoryError {
    map_with(error, |constraint| {
        CatalogRepositoryError::still_referenced(constraint)
    })
}

/// Error for a stored row that no longer satisfies domain validation.
pub(crate) fn invalid_row(entity: &str, error: impl Display) -> CatalogRepositoryError {
    CatalogRepositoryError::query(format!("stored {entity} row is invalid: {error}"))
}

fn map_with(
    error: DieselError,
    foreign_key: fn(String) -> CatalogRepositoryError,
) -> CatalogRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = ?info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => CatalogRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => CatalogRepositoryError::query("database query error"),
        DieselError::DatabaseError(kind, info) => {
            let constraint = info.constraint_name().unwrap_or("unknown").to_owned();
            match kind {
                DatabaseErrorKind::UniqueViolation => {
                    CatalogRepositoryError::unique_violation(constraint)
                }
                DatabaseErrorKind::ForeignKeyViolation => foreign_key(constraint),
                DatabaseErrorKind::ClosedConnection => {
                    CatalogRepositoryError::connection("database connection error")
                }
                _ => CatalogRepositoryError::query("database error"),
            }
        }
        _ => CatalogRepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::constraints;
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    struct Info(Option<&'static str>);

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "violation"
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.0
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info(constraint)))
    }

    #[rstest]
    fn unique_violation_keeps_constraint_name() {
        let error = map_diesel_error(database_error(
            DatabaseErrorKind::UniqueViolation,
            Some(constraints::PRODUCT_SLUG),
        ));
        assert_eq!(
            error,
            CatalogRepositoryError::unique_violation(constraints::PRODUCT_SLUG)
        );
    }

    #[rstest]
    fn foreign_key_meaning_depends_on_operation() {
        let write = map_diesel_error(database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            Some(constraints::PRODUCT_BRAND),
        ));
        let delete = map_delete_error(database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            Some(constraints::PRODUCT_BRAND),
        ));
        assert_eq!(
            write,
            CatalogRepositoryError::missing_reference(constraints::PRODUCT_BRAND)
        );
        assert_eq!(
            delete,
            CatalogRepositoryError::still_referenced(constraints::PRODUCT_BRAND)
        );
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::ClosedConnection, None), true)]
    #[case(database_error(DatabaseErrorKind::SerializationFailure, None), false)]
    #[case(DieselError::NotFound, false)]
    fn other_failures_are_connection_or_query(#[case] error: DieselError, #[case] connection: bool) {
        let mapped = map_diesel_error(error);
        assert_eq!(
            matches!(mapped, CatalogRepositoryError::Connection { .. }),
            connection
        );
    }

    #[rstest]
    fn pool_errors_are_connection_failures() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, CatalogRepositoryError::connection("timed out"));
    }
}
