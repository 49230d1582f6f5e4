//! # DocQA Vector Store
//!
//! In-memory similarity index for document chunks plus the embedding
//! capability that feeds it.
//!
//! ## Architecture
//!
//! ```text
//! chunk texts
//!     │
//!     ├──> Embedder (HTTP service / stub)
//!     │      └─> unit vectors [dimension]
//!     │
//!     └──> VectorStore::add
//!            ├─> FlatIndex (row-major buffer, exact inner product)
//!            └─> parallel text payloads
//!
//! query vector ──> VectorStore::search ──> [(text, score)] best first
//! ```
//!
//! Vectors are expected to be L2-normalised, so the inner product the index
//! computes is the cosine similarity.
//!
//! ## Example
//!
//! ```
//! use docqa_vector_store::VectorStore;
//!
//! let store = VectorStore::new(2).unwrap();
//! store
//!     .add(
//!         vec![vec![1.0, 0.0], vec![0.0, 1.0]],
//!         vec!["east".to_string(), "north".to_string()],
//!     )
//!     .unwrap();
//!
//! let results = store.search(&[0.0, 1.0], 1).unwrap();
//! assert_eq!(results[0].text, "north");
//! ```

mod embeddings;
mod error;
mod index;
mod store;
mod types;

pub use embeddings::{inner_product, normalize, Embedder, EmbeddingMode, HttpEmbedder, StubEmbedder};
pub use error::{Result, VectorStoreError};
pub use store::VectorStore;
pub use types::{IndexedEntry, SearchResult};
