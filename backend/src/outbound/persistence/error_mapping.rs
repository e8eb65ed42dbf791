//! Shared mapping from infrastructure failures to repository errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Map pool failures to repository connection errors.
pub fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RepositoryError::connection(message)
        }
    }
}

/// Map Diesel failures to repository errors.
///
/// Detailed driver messages go to the debug log only; callers receive a
/// stable, non-leaking description.
pub fn map_diesel_error(error: DieselError) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            RepositoryError::conflict("record already exists")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection error")
        }
        _ => RepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(mapped, RepositoryError::Connection { .. }));
        assert!(mapped.to_string().contains("connection refused"));
    }

    #[rstest]
    fn not_found_becomes_query_error() {
        let mapped = map_diesel_error(DieselError::NotFound);
        assert!(matches!(mapped, RepositoryError::Query { .. }));
    }

    #[rstest]
    fn unique_violation_becomes_conflict() {
        let mapped = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        ));
        assert!(matches!(mapped, RepositoryError::Conflict { .. }));
    }
}
