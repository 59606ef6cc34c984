//! Database error types.

use flashcard_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Json(e) => StoreError::InvalidData(e.to_string()),
            DbError::InvalidData(msg) => StoreError::InvalidData(msg),
            other => StoreError::backend(other),
        }
    }
}
