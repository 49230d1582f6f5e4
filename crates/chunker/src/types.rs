use serde::{Deserialize, Serialize};

/// A contiguous run of words cut from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Words of the window joined by single spaces
    pub text: String,

    /// Index of the first word (inclusive)
    pub start_word: usize,

    /// Index one past the last word (exclusive)
    pub end_word: usize,
}

impl TextChunk {
    #[must_use]
    pub fn new(text: String, start_word: usize, end_word: usize) -> Self {
        Self {
            text,
            start_word,
            end_word,
        }
    }

    /// Number of words in the chunk
    #[must_use]
    pub const fn word_count(&self) -> usize {
        self.end_word - self.start_word
    }
}
