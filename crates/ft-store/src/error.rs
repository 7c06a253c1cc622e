//! Error types for ft-store.

use thiserror::Error;

/// Errors that can occur while reading or writing tracker state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[cfg(feature = "sqlite")]
    #[error("metadata JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;
