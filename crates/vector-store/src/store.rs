use crate::error::{Result, VectorStoreError};
use crate::index::FlatIndex;
use crate::types::{IndexedEntry, SearchResult};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

struct Entries {
    index: FlatIndex,
    texts: Vec<String>,
}

/// In-memory store of (embedding, text) pairs.
///
/// Vectors and texts live in parallel containers behind one lock, so a
/// reader never sees a text without its vector. Share it as
/// `Arc<VectorStore>` between ingestion and queries.
pub struct VectorStore {
    dimension: usize,
    entries: RwLock<Entries>,
}

impl VectorStore {
    pub fn new(dimension: usize) -> Result<Self> {
        log::info!("Initializing VectorStore (dimension={dimension})");
        Ok(Self {
            dimension,
            entries: RwLock::new(Entries {
                index: FlatIndex::new(dimension)?,
                texts: Vec::new(),
            }),
        })
    }

    /// Append embeddings and their texts, pairing them by position.
    ///
    /// Fails without mutating anything when the counts differ or a vector has
    /// the wrong dimension.
    pub fn add(&self, embeddings: Vec<Vec<f32>>, texts: Vec<String>) -> Result<()> {
        if embeddings.len() != texts.len() {
            return Err(VectorStoreError::LengthMismatch {
                embeddings: embeddings.len(),
                texts: texts.len(),
            });
        }
        if embeddings.is_empty() {
            return Ok(());
        }

        let mut entries = self.write();
        entries.index.add_batch(&embeddings)?;
        entries.texts.extend(texts);

        log::info!(
            "Added {} entries to store. Total: {}",
            embeddings.len(),
            entries.texts.len()
        );
        Ok(())
    }

    /// Up to `top_k` entries ranked by inner product with `query_embedding`
    pub fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let entries = self.read();
        let neighbors = entries.index.search(query_embedding, top_k)?;

        let results: Vec<SearchResult> = neighbors
            .into_iter()
            .filter_map(|(position, score)| {
                entries.texts.get(position).map(|text| SearchResult {
                    text: text.clone(),
                    score,
                    position,
                })
            })
            .collect();

        log::debug!(
            "Search returned {} of {} entries (top_k={top_k})",
            results.len(),
            entries.texts.len()
        );
        Ok(results)
    }

    /// Entry stored at `position`
    pub fn entry(&self, position: usize) -> Option<IndexedEntry> {
        let entries = self.read();
        let text = entries.texts.get(position)?.clone();
        let vector = entries.index.vector(position)?;
        Some(IndexedEntry {
            position,
            vector,
            text,
        })
    }

    /// Snapshot of all stored texts in insertion order
    pub fn texts(&self) -> Vec<String> {
        self.read().texts.clone()
    }

    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Get total number of entries
    pub fn len(&self) -> usize {
        self.read().texts.len()
    }

    /// Check if store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // `add` validates before it mutates, so a poisoned lock still guards
    // consistent containers.
    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
