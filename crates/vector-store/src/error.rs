use thiserror::Error;

pub type Result<T> = std::result::Result<T, VectorStoreError>;

#[derive(Error, Debug)]
pub enum VectorStoreError {
    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    /// The embedding service did not answer in time. Safe to retry.
    #[error("Embedding request timed out: {0}")]
    EmbeddingTimeout(String),

    #[error("Index error: {0}")]
    IndexError(String),

    #[error("Embeddings and texts length mismatch: {embeddings} embeddings, {texts} texts")]
    LengthMismatch { embeddings: usize, texts: usize },

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl VectorStoreError {
    /// Create an embedding service error
    pub fn embedding(msg: impl Into<String>) -> Self {
        Self::EmbeddingError(msg.into())
    }

    /// Map a transport error of the embedding service, keeping timeouts apart
    pub fn embedding_request(context: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::EmbeddingTimeout(format!("{context}: {err}"))
        } else {
            Self::EmbeddingError(format!("{context}: {err}"))
        }
    }

    /// True for caller-side mistakes that must not be retried
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::LengthMismatch { .. } | Self::InvalidDimension { .. }
        )
    }
}
