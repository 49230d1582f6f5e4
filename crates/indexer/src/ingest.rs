use crate::error::{IndexerError, Result};
use crate::loader::DocumentLoader;
use crate::scanner::DocumentScanner;
use crate::stats::IngestStats;
use docqa_chunker::{Chunker, ChunkerConfig};
use docqa_vector_store::{Embedder, VectorStore, VectorStoreError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Where to read documents from and how to cut them
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub docs_dir: PathBuf,
    pub chunker: ChunkerConfig,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("documents"),
            chunker: ChunkerConfig::default(),
        }
    }
}

/// A document that has been loaded, chunked and embedded but not yet stored
struct PreparedDocument {
    path: PathBuf,
    chunks: Vec<String>,
    embeddings: Vec<Vec<f32>>,
}

/// Loads, chunks, embeds and stores every text document of a directory
pub struct DocumentIngestor {
    docs_dir: PathBuf,
    loader: DocumentLoader,
    chunker: Chunker,
    embedder: Arc<dyn Embedder>,
    store: Arc<VectorStore>,
}

impl DocumentIngestor {
    pub fn new(
        store: Arc<VectorStore>,
        embedder: Arc<dyn Embedder>,
        config: IngestConfig,
    ) -> Result<Self> {
        let chunker = Chunker::new(config.chunker)?;
        Ok(Self {
            docs_dir: config.docs_dir,
            loader: DocumentLoader::new(),
            chunker,
            embedder,
            store,
        })
    }

    pub fn docs_dir(&self) -> &Path {
        &self.docs_dir
    }

    /// Ingest every document and return the total number of chunks stored
    pub async fn ingest_all(&self) -> Result<usize> {
        Ok(self.ingest().await?.chunks)
    }

    /// Ingest every `.txt` file of the documents directory in file-name order.
    ///
    /// All documents are prepared before anything is stored: if one of them
    /// fails to load, chunk or embed, the run fails and the store is left
    /// untouched.
    pub async fn ingest(&self) -> Result<IngestStats> {
        let start = Instant::now();

        if !self.docs_dir.exists() {
            return Err(IndexerError::NotFound(format!(
                "Documents folder not found: {}",
                self.docs_dir.display()
            )));
        }
        if !self.docs_dir.is_dir() {
            return Err(IndexerError::InvalidPath(format!(
                "Not a directory: {}",
                self.docs_dir.display()
            )));
        }

        let files = DocumentScanner::new(&self.docs_dir).scan()?;

        let mut prepared = Vec::with_capacity(files.len());
        for path in &files {
            prepared.push(self.prepare(path).await?);
        }

        let mut stats = IngestStats::default();
        for document in prepared {
            if document.chunks.is_empty() {
                log::warn!("Skipping empty document {}", document.path.display());
                stats.skipped_empty += 1;
                continue;
            }

            let count = document.chunks.len();
            self.store.add(document.embeddings, document.chunks)?;
            stats.add_document(count);
            log::debug!("Stored {} chunks from {}", count, document.path.display());
        }

        stats.time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        log::info!(
            "Ingested {} documents, {} chunks in {} ms",
            stats.documents,
            stats.chunks,
            stats.time_ms
        );
        Ok(stats)
    }

    /// Ingest a single document and return the number of chunks stored
    pub async fn ingest_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        let document = self.prepare(path.as_ref()).await?;
        let count = document.chunks.len();
        self.store.add(document.embeddings, document.chunks)?;
        log::info!("Ingested {} chunks from {}", count, path.as_ref().display());
        Ok(count)
    }

    async fn prepare(&self, path: &Path) -> Result<PreparedDocument> {
        let text = self.loader.load(path).await?;
        let chunks = self.chunker.chunk(&text);
        let embeddings = self.embedder.embed_batch(&chunks).await?;

        if embeddings.len() != chunks.len() {
            return Err(IndexerError::EmbeddingCountMismatch {
                document: path.display().to_string(),
                chunks: chunks.len(),
                embeddings: embeddings.len(),
            });
        }

        // Checked here so that committing a prepared batch cannot fail halfway.
        let expected = self.store.dimension();
        if let Some(bad) = embeddings.iter().find(|v| v.len() != expected) {
            return Err(VectorStoreError::InvalidDimension {
                expected,
                actual: bad.len(),
            }
            .into());
        }

        Ok(PreparedDocument {
            path: path.to_path_buf(),
            chunks,
            embeddings,
        })
    }
}
