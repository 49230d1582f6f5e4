use std::path::Path;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    WalkError(#[from] ignore::Error),

    #[error("Chunker error: {0}")]
    ChunkerError(#[from] docqa_chunker::ChunkerError),

    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] docqa_vector_store::VectorStoreError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unsupported file type: {0} (only .txt files are supported)")]
    UnsupportedType(String),

    #[error("Invalid documents path: {0}")]
    InvalidPath(String),

    #[error("Embedder returned {embeddings} vectors for {chunks} chunks of {document}")]
    EmbeddingCountMismatch {
        document: String,
        chunks: usize,
        embeddings: usize,
    },
}

impl IndexerError {
    pub(crate) fn not_found(path: &Path) -> Self {
        Self::NotFound(path.display().to_string())
    }
}
