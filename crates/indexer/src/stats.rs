use serde::{Deserialize, Serialize};

/// Statistics about an ingestion run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    /// Documents that produced at least one chunk
    pub documents: usize,

    /// Number of chunks stored
    pub chunks: usize,

    /// Documents with no words, not stored
    pub skipped_empty: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl IngestStats {
    pub fn add_document(&mut self, chunks: usize) {
        self.documents += 1;
        self.chunks += chunks;
    }
}
