use crate::completion::{CompletionClient, CompletionRequest};
use crate::error::{RagError, Result};
use crate::prompt::{build_prompt, UNKNOWN_ANSWER};
use docqa_protocol::QueryResponse;
use docqa_vector_store::{Embedder, SearchResult, VectorStore, VectorStoreError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Number of chunks used to ground an answer by default
pub const DEFAULT_TOP_K: usize = 3;

/// Fixed sampling settings sent with every completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub n_predict: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub stop: Vec<String>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            n_predict: 80,
            temperature: 0.2,
            top_p: 0.9,
            stop: vec!["</s>".to_string()],
        }
    }
}

impl GenerationParams {
    #[must_use]
    pub fn request(&self, prompt: String) -> CompletionRequest {
        CompletionRequest {
            prompt,
            n_predict: self.n_predict,
            temperature: self.temperature,
            top_p: self.top_p,
            stop: self.stop.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagConfig {
    pub top_k: usize,
    pub generation: GenerationParams,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            generation: GenerationParams::default(),
        }
    }
}

/// Answer plus the context it was grounded on.
///
/// `context[i]` was retrieved with similarity `scores[i]`, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagAnswer {
    pub question: String,
    pub answer: String,
    pub context: Vec<String>,
    pub scores: Vec<f32>,
}

impl RagAnswer {
    fn unknown(question: &str) -> Self {
        Self {
            question: question.to_string(),
            answer: UNKNOWN_ANSWER.to_string(),
            context: Vec::new(),
            scores: Vec::new(),
        }
    }
}

impl From<RagAnswer> for QueryResponse {
    fn from(answer: RagAnswer) -> Self {
        Self {
            question: answer.question,
            answer: answer.answer,
            context: answer.context,
            scores: answer.scores,
        }
    }
}

/// Retrieval-augmented question answering over a shared [`VectorStore`]
pub struct RagService {
    store: Arc<VectorStore>,
    embedder: Arc<dyn Embedder>,
    completion: Arc<dyn CompletionClient>,
    config: RagConfig,
}

impl RagService {
    pub fn new(
        store: Arc<VectorStore>,
        embedder: Arc<dyn Embedder>,
        completion: Arc<dyn CompletionClient>,
        config: RagConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            completion,
            config,
        }
    }

    pub const fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Answer with the configured `top_k`
    pub async fn query(&self, question: &str) -> Result<RagAnswer> {
        self.answer(question, self.config.top_k).await
    }

    /// Embed the question, retrieve `top_k` chunks and ask the completion
    /// service to answer from them only.
    ///
    /// With nothing retrieved the answer is "I don't know." and the
    /// completion service is not called.
    pub async fn answer(&self, question: &str, top_k: usize) -> Result<RagAnswer> {
        let query_embedding = self
            .embedder
            .embed(question)
            .await
            .map_err(|e| match e {
                VectorStoreError::EmbeddingTimeout(msg) => RagError::UpstreamTimeout(msg),
                other => RagError::Upstream(other.to_string()),
            })?;

        let results = self.store.search(&query_embedding, top_k)?;
        if results.is_empty() {
            log::debug!("No context retrieved for question; answering without LLM");
            return Ok(RagAnswer::unknown(question));
        }

        let (context, scores): (Vec<String>, Vec<f32>) =
            results.into_iter().map(SearchResult::into_pair).unzip();

        let prompt = build_prompt(&context, question);
        log::debug!(
            "Built prompt with {} context chunks ({} chars)",
            context.len(),
            prompt.len()
        );

        let request = self.config.generation.request(prompt);
        let completion = self.completion.complete(&request).await.map_err(|e| {
            log::warn!("Completion failed: {e}");
            RagError::from(e)
        })?;

        let answer = match completion.content.trim() {
            "" => UNKNOWN_ANSWER.to_string(),
            text => text.to_string(),
        };

        Ok(RagAnswer {
            question: question.to_string(),
            answer,
            context,
            scores,
        })
    }
}
