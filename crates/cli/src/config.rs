use docqa_chunker::ChunkerConfig;
use docqa_indexer::IngestConfig;
use docqa_rag::{GenerationParams, RagConfig};
use docqa_vector_store::{Embedder, EmbeddingMode, HttpEmbedder, StubEmbedder, VectorStoreError};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Prefix of the environment variables that override config values
pub const ENV_PREFIX: &str = "DOCQA_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {var}: {message}")]
    Env { var: String, message: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Runtime settings of the `docqa` binary.
///
/// Resolved in layers: built-in defaults, then the TOML file given with
/// `--config`, then `DOCQA_*` environment variables, then command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub docs_dir: PathBuf,
    pub chunk_size: usize,
    pub overlap: usize,
    pub embedding_dim: usize,
    pub embedding_mode: EmbeddingMode,
    pub embedding_url: String,
    pub embedding_model: String,
    pub embedding_timeout_secs: u64,
    pub llm_url: String,
    pub llm_timeout_secs: u64,
    pub n_predict: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub stop: Vec<String>,
    pub top_k: usize,
    pub bind: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let chunker = ChunkerConfig::default();
        let generation = GenerationParams::default();
        Self {
            docs_dir: PathBuf::from("documents"),
            chunk_size: chunker.chunk_size,
            overlap: chunker.overlap,
            embedding_dim: 384,
            embedding_mode: EmbeddingMode::default(),
            embedding_url: "http://localhost:8081/v1/embeddings".to_string(),
            embedding_model: "all-MiniLM-L6-v2".to_string(),
            embedding_timeout_secs: 30,
            llm_url: docqa_rag::DEFAULT_COMPLETION_URL.to_string(),
            llm_timeout_secs: docqa_rag::DEFAULT_COMPLETION_TIMEOUT.as_secs(),
            n_predict: generation.n_predict,
            temperature: generation.temperature,
            top_p: generation.top_p,
            stop: generation.stop,
            top_k: docqa_rag::DEFAULT_TOP_K,
            bind: "127.0.0.1:8000".to_string(),
        }
    }
}

/// Values given on the command line; `None` keeps the lower layer
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub docs_dir: Option<PathBuf>,
    pub embedding_mode: Option<EmbeddingMode>,
    pub llm_url: Option<String>,
    pub top_k: Option<usize>,
    pub bind: Option<String>,
}

impl AppConfig {
    /// Resolve every layer against the process environment and validate
    pub fn resolve(file: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_with(|name| std::env::var(name).ok())?;
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `DOCQA_*` variables read through `lookup`. Blank values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(&format!("{ENV_PREFIX}{name}")).filter(|value| !value.trim().is_empty())
        };

        if let Some(value) = var("DOCS_DIR") {
            self.docs_dir = PathBuf::from(value);
        }
        if let Some(value) = var("CHUNK_SIZE") {
            self.chunk_size = parse_env("CHUNK_SIZE", &value)?;
        }
        if let Some(value) = var("OVERLAP") {
            self.overlap = parse_env("OVERLAP", &value)?;
        }
        if let Some(value) = var("EMBEDDING_DIM") {
            self.embedding_dim = parse_env("EMBEDDING_DIM", &value)?;
        }
        if let Some(value) = var("EMBEDDING_MODE") {
            self.embedding_mode = parse_env("EMBEDDING_MODE", &value)?;
        }
        if let Some(value) = var("EMBEDDING_URL") {
            self.embedding_url = value;
        }
        if let Some(value) = var("EMBEDDING_MODEL") {
            self.embedding_model = value;
        }
        if let Some(value) = var("EMBEDDING_TIMEOUT_SECS") {
            self.embedding_timeout_secs = parse_env("EMBEDDING_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = var("LLM_URL") {
            self.llm_url = value;
        }
        if let Some(value) = var("LLM_TIMEOUT_SECS") {
            self.llm_timeout_secs = parse_env("LLM_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = var("N_PREDICT") {
            self.n_predict = parse_env("N_PREDICT", &value)?;
        }
        if let Some(value) = var("TEMPERATURE") {
            self.temperature = parse_env("TEMPERATURE", &value)?;
        }
        if let Some(value) = var("TOP_P") {
            self.top_p = parse_env("TOP_P", &value)?;
        }
        if let Some(value) = var("STOP") {
            self.stop = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect();
        }
        if let Some(value) = var("TOP_K") {
            self.top_k = parse_env("TOP_K", &value)?;
        }
        if let Some(value) = var("BIND") {
            self.bind = value;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(docs_dir) = &overrides.docs_dir {
            self.docs_dir.clone_from(docs_dir);
        }
        if let Some(mode) = overrides.embedding_mode {
            self.embedding_mode = mode;
        }
        if let Some(url) = &overrides.llm_url {
            self.llm_url.clone_from(url);
        }
        if let Some(top_k) = overrides.top_k {
            self.top_k = top_k;
        }
        if let Some(bind) = &overrides.bind {
            self.bind.clone_from(bind);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chunker().validate().map_err(ConfigError::Invalid)?;
        if self.embedding_dim == 0 {
            return Err(ConfigError::Invalid("embedding_dim must be > 0".to_string()));
        }
        if self.top_k == 0 {
            return Err(ConfigError::Invalid("top_k must be > 0".to_string()));
        }
        if self.llm_timeout_secs == 0 {
            return Err(ConfigError::Invalid("llm_timeout_secs must be > 0".to_string()));
        }
        if self.embedding_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "embedding_timeout_secs must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    pub const fn chunker(&self) -> ChunkerConfig {
        ChunkerConfig::new(self.chunk_size, self.overlap)
    }

    pub fn ingest(&self) -> IngestConfig {
        IngestConfig {
            docs_dir: self.docs_dir.clone(),
            chunker: self.chunker(),
        }
    }

    pub fn rag(&self) -> RagConfig {
        RagConfig {
            top_k: self.top_k,
            generation: GenerationParams {
                n_predict: self.n_predict,
                temperature: self.temperature,
                top_p: self.top_p,
                stop: self.stop.clone(),
            },
        }
    }

    pub const fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    pub fn build_embedder(&self) -> Result<Arc<dyn Embedder>, VectorStoreError> {
        match self.embedding_mode {
            EmbeddingMode::Stub => {
                log::info!("Using stub embeddings (dimension={})", self.embedding_dim);
                Ok(Arc::new(StubEmbedder::new(self.embedding_dim)))
            }
            EmbeddingMode::Http => {
                log::info!(
                    "Using embedding service {} (model={}, dimension={})",
                    self.embedding_url,
                    self.embedding_model,
                    self.embedding_dim
                );
                Ok(Arc::new(HttpEmbedder::new(
                    self.embedding_url.clone(),
                    self.embedding_model.clone(),
                    self.embedding_dim,
                    Duration::from_secs(self.embedding_timeout_secs),
                )?))
            }
        }
    }
}

fn parse_env<T>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse().map_err(|err: T::Err| ConfigError::Env {
        var: format!("{ENV_PREFIX}{name}"),
        message: err.to_string(),
    })
}
