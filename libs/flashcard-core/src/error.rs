//! Error types for flashcard-core.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by collection operations and practice sessions.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no cards to practice")]
    NoCards,

    #[error("collection not found: {0}")]
    CollectionNotFound(Uuid),

    #[error("card {card_id} not found in collection {collection_id}")]
    CardNotFound { collection_id: Uuid, card_id: Uuid },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors reported by a [`CollectionStore`](crate::collections::CollectionStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("invalid stored data: {0}")]
    InvalidData(String),
}

impl StoreError {
    /// Wrap any backend error.
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

/// Errors from turning a question-generation response into card contents.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no content received from the generator")]
    EmptyResponse,

    #[error("failed to parse generated questions: {0}")]
    Json(#[from] serde_json::Error),

    #[error("generated content is not a non-empty array of questions")]
    InvalidFormat,

    #[error("no valid questions generated")]
    NoValidQuestions,

    #[error("generator failed: {0}")]
    Provider(String),
}
