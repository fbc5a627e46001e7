//! Error handling utilities for repositories

use channel_core::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Fail with `not_found` when an update or delete touched nothing
pub fn expect_rows(rows_affected: u64, not_found: impl FnOnce() -> DomainError) -> Result<(), DomainError> {
    if rows_affected == 0 {
        Err(not_found())
    } else {
        Ok(())
    }
}
