use serde::{Deserialize, Serialize};

/// One ranked hit returned by [`crate::VectorStore::search`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub text: String,
    pub score: f32,
    /// Insertion position of the matched entry
    pub position: usize,
}

impl SearchResult {
    #[must_use]
    pub fn into_pair(self) -> (String, f32) {
        (self.text, self.score)
    }
}

/// A stored vector and the text it was computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedEntry {
    pub position: usize,
    pub vector: Vec<f32>,
    pub text: String,
}
