use docqa_vector_store::VectorStoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RagError>;

/// Failure of a completion request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("LLM request timed out: {0}")]
    Timeout(String),

    #[error("LLM request failed: {0}")]
    Upstream(String),
}

#[derive(Error, Debug)]
pub enum RagError {
    /// The completion service did not answer in time. Safe to retry.
    #[error("Upstream timeout: {0}")]
    UpstreamTimeout(String),

    /// The embedding or completion service failed.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Vector store error: {0}")]
    VectorStore(#[from] VectorStoreError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<CompletionError> for RagError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Timeout(msg) => Self::UpstreamTimeout(msg),
            CompletionError::Upstream(msg) => Self::Upstream(msg),
        }
    }
}

impl RagError {
    /// True when a caller may reasonably try the same request again
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamTimeout(_))
    }
}
