//! # DocQA Indexer
//!
//! Document ingestion for the question-answering store.
//!
//! ## Pipeline
//!
//! ```text
//! Directory
//!     │
//!     ├──> Document Scanner (flat, *.txt, sorted by name)
//!     │      └─> Text files
//!     │
//!     ├──> Loader (lossy UTF-8)
//!     │
//!     ├──> Chunker (sliding word window)
//!     │      └─> Chunks
//!     │
//!     └──> Embedder ──> Vector Store (one add per document)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use docqa_indexer::{DocumentIngestor, IngestConfig};
//! use docqa_vector_store::{StubEmbedder, VectorStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(VectorStore::new(384)?);
//!     let embedder = Arc::new(StubEmbedder::new(384));
//!     let ingestor = DocumentIngestor::new(store, embedder, IngestConfig::default())?;
//!
//!     let chunks = ingestor.ingest_all().await?;
//!     println!("Ingested {chunks} chunks");
//!     Ok(())
//! }
//! ```

mod error;
mod ingest;
mod loader;
mod scanner;
mod stats;

pub use error::{IndexerError, Result};
pub use ingest::{DocumentIngestor, IngestConfig};
pub use loader::DocumentLoader;
pub use scanner::DocumentScanner;
pub use stats::IngestStats;
