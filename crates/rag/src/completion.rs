use crate::error::{CompletionError, RagError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default llama.cpp server completion endpoint
pub const DEFAULT_COMPLETION_URL: &str = "http://localhost:8080/completion";

/// CPU inference is slow; requests get minutes, not seconds.
pub const DEFAULT_COMPLETION_TIMEOUT: Duration = Duration::from_secs(180);

/// Body of a completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub n_predict: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub stop: Vec<String>,
}

/// Body of a completion response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Missing or `null` reads as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Prompt → text capability used by the query path
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> std::result::Result<CompletionResponse, CompletionError>;
}

/// Client for a llama.cpp-style `/completion` endpoint
pub struct LlamaCppClient {
    client: Client,
    url: String,
}

impl LlamaCppClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RagError::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn classify(err: &reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout(err.to_string())
    } else {
        CompletionError::Upstream(err.to_string())
    }
}

#[async_trait]
impl CompletionClient for LlamaCppClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> std::result::Result<CompletionResponse, CompletionError> {
        log::debug!(
            "Requesting completion from {} (prompt {} chars, n_predict {})",
            self.url,
            request.prompt.len(),
            request.n_predict
        );

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| classify(&e))?;

        response.json::<CompletionResponse>().await.map_err(|e| classify(&e))
    }
}
