//! # DocQA RAG
//!
//! Query path: question → embedding → top-k chunks → grounded prompt →
//! completion service → answer.
//!
//! ```text
//! question ──> Embedder ──> VectorStore::search
//!                                 │
//!                   no hits ──────┴────── hits
//!                      │                   │
//!              "I don't know."      build_prompt(context, question)
//!                                          │
//!                                   CompletionClient::complete
//!                                          │
//!                            empty ──> "I don't know." / trimmed text
//! ```
//!
//! Embedding and completion services are injected as trait objects so they
//! can be replaced with test doubles.

mod completion;
mod error;
mod prompt;
mod service;

pub use completion::{
    CompletionClient, CompletionRequest, CompletionResponse, LlamaCppClient,
    DEFAULT_COMPLETION_TIMEOUT, DEFAULT_COMPLETION_URL,
};
pub use error::{CompletionError, RagError, Result};
pub use prompt::{build_prompt, UNKNOWN_ANSWER};
pub use service::{GenerationParams, RagAnswer, RagConfig, RagService, DEFAULT_TOP_K};
