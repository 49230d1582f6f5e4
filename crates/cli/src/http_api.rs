use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use docqa_protocol::{ErrorEnvelope, HealthResponse, QueryRequest, QueryResponse};
use docqa_rag::{RagError, RagService};
use docqa_vector_store::VectorStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<VectorStore>,
    pub rag: Arc<RagService>,
}

/// `POST /query` and `GET /health`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/query", post(query))
        .route("/health", get(health))
        .with_state(state)
}

async fn query(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                ErrorEnvelope::new("invalid_request", rejection.body_text())
                    .with_hint(r#"Send a JSON body like {"question": "..."}"#),
            );
        }
    };

    if request.question.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            ErrorEnvelope::new("invalid_request", "question must not be empty"),
        );
    }

    let top_k = request.top_k.unwrap_or(state.rag.config().top_k);
    match state.rag.answer(&request.question, top_k).await {
        Ok(answer) => Json(QueryResponse::from(answer)).into_response(),
        Err(err) => {
            log::error!("Query failed: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, envelope_for(&err))
        }
    }
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.store.len()))
}

fn envelope_for(err: &RagError) -> ErrorEnvelope {
    match err {
        RagError::UpstreamTimeout(_) => ErrorEnvelope::new("upstream_timeout", err.to_string())
            .with_hint("An upstream service is slow; retry or raise its timeout."),
        RagError::Upstream(_) => ErrorEnvelope::new("upstream_error", err.to_string())
            .with_hint("Check that the embedding and completion services are reachable."),
        RagError::VectorStore(_) | RagError::InvalidConfig(_) => {
            ErrorEnvelope::new("internal_error", err.to_string())
        }
    }
}

fn error_response(status: StatusCode, envelope: ErrorEnvelope) -> Response {
    (status, Json(envelope)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use docqa_rag::{
        CompletionClient, CompletionError, CompletionRequest, CompletionResponse, RagConfig,
    };
    use docqa_vector_store::{Embedder, StubEmbedder};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    struct FixedCompletion(Result<String, CompletionError>);

    #[async_trait]
    impl CompletionClient for FixedCompletion {
        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, CompletionError> {
            self.0.clone().map(|content| CompletionResponse { content })
        }
    }

    async fn spawn(completion: FixedCompletion, texts: &[&str]) -> String {
        let embedder: Arc<dyn Embedder> = Arc::new(StubEmbedder::new(16));
        let store = Arc::new(VectorStore::new(16).unwrap());
        let texts: Vec<String> = texts.iter().map(ToString::to_string).collect();
        let embeddings = embedder.embed_batch(&texts).await.unwrap();
        store.add(embeddings, texts).unwrap();

        let rag = Arc::new(RagService::new(
            store.clone(),
            embedder,
            Arc::new(completion),
            RagConfig::default(),
        ));
        let app = router(AppState { store, rag });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn post_query(base: &str, body: Value) -> (u16, Value) {
        let response = reqwest::Client::new()
            .post(format!("{base}/query"))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    #[tokio::test]
    async fn health_reports_chunk_count() {
        let base = spawn(FixedCompletion(Ok(String::new())), &["a", "b"]).await;
        let body: Value = reqwest::get(format!("{base}/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body, json!({"status": "ok", "chunks": 2}));
    }

    #[tokio::test]
    async fn query_returns_answer_with_context() {
        let base = spawn(
            FixedCompletion(Ok(" RAG combines retrieval and generation. ".to_string())),
            &["RAG combines retrieval and generation.", "FAISS is a library."],
        )
        .await;

        let (status, body) = post_query(
            &base,
            json!({"question": "RAG combines retrieval and generation.", "top_k": 1}),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(body["answer"], "RAG combines retrieval and generation.");
        assert_eq!(
            body["context"],
            json!(["RAG combines retrieval and generation."])
        );
        assert_eq!(body["scores"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_question_is_rejected() {
        let base = spawn(FixedCompletion(Ok(String::new())), &["a"]).await;
        let (status, body) = post_query(&base, json!({"question": "   "})).await;
        assert_eq!(status, 400);
        assert_eq!(body["code"], "invalid_request");
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let base = spawn(FixedCompletion(Ok(String::new())), &["a"]).await;
        let (status, body) = post_query(&base, json!({"query": "wrong field"})).await;
        assert_eq!(status, 400);
        assert_eq!(body["code"], "invalid_request");
    }

    #[tokio::test]
    async fn upstream_failures_map_to_error_codes() {
        let base = spawn(
            FixedCompletion(Err(CompletionError::Timeout("180s elapsed".to_string()))),
            &["a"],
        )
        .await;
        let (status, body) = post_query(&base, json!({"question": "a"})).await;
        assert_eq!(status, 500);
        assert_eq!(body["code"], "upstream_timeout");

        let base = spawn(
            FixedCompletion(Err(CompletionError::Upstream("refused".to_string()))),
            &["a"],
        )
        .await;
        let (status, body) = post_query(&base, json!({"question": "a"})).await;
        assert_eq!(status, 500);
        assert_eq!(body["code"], "upstream_error");
        assert!(body["hint"].is_string());
    }
}
