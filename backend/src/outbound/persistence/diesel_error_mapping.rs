//! Shared Diesel error mapping for the record stores.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::StoreError;

/// Map Diesel errors into store errors, keeping SQLite's message text.
pub(crate) fn map_diesel_error(error: DieselError) -> StoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            error = %error,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            StoreError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => StoreError::query(info.message().to_owned()),
        DieselError::NotFound => StoreError::query("record not found"),
        other => StoreError::query(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn not_found_maps_to_query_error() {
        let mapped = map_diesel_error(DieselError::NotFound);
        assert_eq!(mapped, StoreError::query("record not found"));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let mapped = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("connection closed".to_owned()),
        ));
        assert_eq!(mapped, StoreError::connection("connection closed"));
    }

    #[rstest]
    fn constraint_violation_keeps_sqlite_message() {
        let mapped = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::NotNullViolation,
            Box::new("NOT NULL constraint failed: cars.make".to_owned()),
        ));
        assert_eq!(
            mapped.to_string(),
            "record store query failed: NOT NULL constraint failed: cars.make"
        );
    }
}
