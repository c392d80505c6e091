//! Translation of rusqlite and r2d2 failures into [`movieweb_common::Error`].

use movieweb_common::Error;
use rusqlite::ErrorCode;

/// Map a rusqlite error onto the common error taxonomy.
///
/// Only busy and locked databases are transient; a file that cannot be
/// opened stays unopenable. Foreign-key violations mean a referenced row is
/// missing. Other constraint failures are bad input; everything else is
/// internal.
pub fn map_sqlite_error(e: rusqlite::Error) -> Error {
    match &e {
        rusqlite::Error::SqliteFailure(err, msg) => match err.code {
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => {
                Error::transient(e.to_string())
            }
            ErrorCode::ConstraintViolation => {
                let detail = msg.as_deref().unwrap_or_default();
                if detail.contains("FOREIGN KEY") {
                    Error::not_found("referenced row", detail)
                } else {
                    Error::invalid_input(e.to_string())
                }
            }
            _ => Error::internal(e.to_string()),
        },
        _ => Error::internal(e.to_string()),
    }
}

/// Whether `e` is a UNIQUE constraint failure.
pub fn is_unique_violation(e: &rusqlite::Error) -> bool {
    match e {
        rusqlite::Error::SqliteFailure(err, msg) => {
            err.code == ErrorCode::ConstraintViolation
                && msg
                    .as_deref()
                    .is_some_and(|m| m.contains("UNIQUE constraint failed"))
        }
        _ => false,
    }
}

/// Map a pool checkout failure. r2d2 only fails a checkout on timeout, which
/// means every connection is in use.
pub fn map_pool_error(e: r2d2::Error) -> Error {
    Error::transient(format!("Failed to get connection from pool: {e}"))
}
