use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};
use crate::types::TextChunk;

/// Sliding word-window chunker
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    /// Create a new chunker, rejecting configs whose window cannot advance
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        config.validate().map_err(ChunkerError::invalid_config)?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Chunk text into window strings
    #[must_use]
    pub fn chunk(&self, text: &str) -> Vec<String> {
        self.chunk_spans(text)
            .into_iter()
            .map(|chunk| chunk.text)
            .collect()
    }

    /// Chunk text, keeping the word span of every window.
    ///
    /// Windows stop once one of them reaches the last word, so the tail of a
    /// document is never repeated as a chunk fully contained in its
    /// predecessor.
    #[must_use]
    pub fn chunk_spans(&self, text: &str) -> Vec<TextChunk> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let total = words.len();
        let step = self.config.step();

        let mut chunks = Vec::with_capacity(total.div_ceil(step.max(1)));
        let mut start = 0;
        while start < total {
            let end = (start + self.config.chunk_size).min(total);
            let joined = words[start..end].join(" ");
            if !joined.trim().is_empty() {
                chunks.push(TextChunk::new(joined, start, end));
            }
            if end == total {
                break;
            }
            start += step;
        }

        log::debug!(
            "Chunked {} words into {} chunks (size={}, overlap={})",
            total,
            chunks.len(),
            self.config.chunk_size,
            self.config.overlap
        );
        chunks
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            config: ChunkerConfig::default(),
        }
    }
}
