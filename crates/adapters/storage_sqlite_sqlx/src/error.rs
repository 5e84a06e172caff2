//! Storage-specific error type wrapping sqlx errors.

use citas_domain::error::CitasError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored count did not fit in `usize`.
    #[error("row count out of range")]
    Count(#[from] std::num::TryFromIntError),
}

impl From<StorageError> for CitasError {
    fn from(err: StorageError) -> Self {
        Self::internal(err)
    }
}
