//! Shared error classification for the Diesel repositories.
//!
//! Each repository owns its port error type, so this module reduces Diesel
//! failures to a small [`DbFailure`] vocabulary that the repositories map
//! onward. Details of the failing statement are logged at debug level and
//! never copied into the port error.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Storage failure reduced to what callers can act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DbFailure {
    /// The connection dropped mid-statement.
    Connection(&'static str),
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// A foreign key constraint rejected the write.
    ForeignKeyViolation { constraint: Option<String> },
    /// Anything else.
    Query(&'static str),
}

/// Classify a Diesel error.
pub(crate) fn classify_diesel_error(error: DieselError, operation: &'static str) -> DbFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), operation, "diesel operation failed");
        }
        _ => debug!(%error, operation, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => DbFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DbFailure::Query("database query error"),
        DieselError::DatabaseError(kind, info) => {
            let constraint = info.constraint_name().map(str::to_owned);
            match kind {
                DatabaseErrorKind::UniqueViolation => DbFailure::UniqueViolation { constraint },
                DatabaseErrorKind::ForeignKeyViolation => {
                    DbFailure::ForeignKeyViolation { constraint }
                }
                DatabaseErrorKind::ClosedConnection => {
                    DbFailure::Connection("database connection error")
                }
                _ => DbFailure::Query("database error"),
            }
        }
        _ => DbFailure::Query("database error"),
    }
}

/// Collect row conversion results, mapping the first error through `map_err`.
pub(crate) fn collect_rows<T, E>(
    results: impl Iterator<Item = Result<T, String>>,
    map_err: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    results.collect::<Result<Vec<_>, _>>().map_err(map_err)
}
