//! # DocQA Chunker
//!
//! Word-window chunking for retrieval.
//!
//! Text is split on whitespace into words, then a window of `chunk_size`
//! words slides over them, advancing by `chunk_size - overlap` words per step.
//! Neighbouring chunks therefore share exactly `overlap` words.
//!
//! ```text
//! words:   a b c d e f g h
//! chunk 0: a b c d e
//! chunk 1:       d e f g h      (chunk_size = 5, overlap = 2)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use docqa_chunker::{Chunker, ChunkerConfig};
//!
//! let chunker = Chunker::new(ChunkerConfig::new(5, 2)).unwrap();
//! let chunks = chunker.chunk("a b c d e f g h");
//! assert_eq!(chunks, vec!["a b c d e", "d e f g h"]);
//! ```

mod chunker;
mod config;
mod error;
mod types;

pub use chunker::Chunker;
pub use config::{ChunkerConfig, DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP};
pub use error::{ChunkerError, Result};
pub use types::TextChunk;
