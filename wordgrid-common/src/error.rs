//! Common error types for the puzzle store

use thiserror::Error;

/// Common result type for store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds surfaced by the store
///
/// Queries that find nothing return `Ok(None)` rather than an error;
/// [`Error::NotFound`] is reserved for callers that need to turn absence
/// into a failure (e.g. the importer referencing a missing puzzle).
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input, e.g. a letter grid that is not N×N
    #[error("Validation error: {0}")]
    Validation(String),

    /// A foreign key points at a row that does not exist
    #[error("Referential error: {0}")]
    Referential(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// The database cannot be opened or reached
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Puzzle file could not be parsed
    #[error("Import error: {0}")]
    Import(#[from] serde_json::Error),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err)
                if db_err.is_foreign_key_violation()
                    || db_err.message().contains("FOREIGN KEY constraint failed") =>
            {
                Error::Referential(db_err.message().to_string())
            }
            sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
                Error::StoreUnavailable(err.to_string())
            }
            other => Error::Database(other),
        }
    }
}

impl Error {
    /// True when the underlying database rejected a duplicate key
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Error::Database(sqlx::Error::Database(db_err))
                if db_err.is_unique_violation()
                    || db_err.message().contains("UNIQUE constraint failed")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_closed_maps_to_store_unavailable() {
        let err: Error = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, Error::StoreUnavailable(_)));
    }

    #[test]
    fn test_row_not_found_stays_database_error() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, Error::Database(_)));
        assert!(!err.is_unique_violation());
    }

    #[test]
    fn test_display_messages() {
        let err = Error::Validation("letters length 5 is not a perfect square".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: letters length 5 is not a perfect square"
        );
    }
}
