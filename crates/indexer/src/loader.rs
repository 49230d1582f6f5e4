use crate::error::{IndexerError, Result};
use std::path::Path;

pub(crate) const TEXT_EXTENSION: &str = "txt";

/// Loads raw text from `.txt` files
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentLoader;

impl DocumentLoader {
    pub const fn new() -> Self {
        Self
    }

    /// True when the path has a `.txt` extension (any case)
    pub fn is_text_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(TEXT_EXTENSION))
    }

    /// Read a document, dropping byte sequences that are not valid UTF-8
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(IndexerError::not_found(path));
        }

        if !Self::is_text_file(path) {
            return Err(IndexerError::UnsupportedType(path.display().to_string()));
        }

        let bytes = tokio::fs::read(path).await?;
        Ok(decode_dropping_invalid(&bytes))
    }
}

fn decode_dropping_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}
