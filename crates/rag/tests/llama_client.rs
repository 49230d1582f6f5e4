use axum::{http::StatusCode, routing::post, Json, Router};
use docqa_rag::{CompletionClient, CompletionError, GenerationParams, LlamaCppClient};
use serde_json::{json, Value};
use std::time::Duration;

async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}/completion")
}

fn request() -> docqa_rag::CompletionRequest {
    GenerationParams::default().request("Context:\nabc\n\nQuestion:\nq\n\nAnswer:".to_string())
}

#[tokio::test]
async fn sends_llama_cpp_payload_and_reads_content() {
    let app = Router::new().route(
        "/completion",
        post(|Json(body): Json<Value>| async move {
            let ok = body["n_predict"] == 80
                && body["stop"] == json!(["</s>"])
                && body["prompt"].as_str().is_some_and(|p| p.ends_with("Answer:"))
                && body.get("temperature").is_some()
                && body.get("top_p").is_some();
            Json(json!({ "content": if ok { "grounded answer" } else { "bad payload" } }))
        }),
    );
    let url = spawn_server(app).await;
    let client = LlamaCppClient::new(url, Duration::from_secs(5)).expect("client");

    let response = client.complete(&request()).await.expect("completion");
    assert_eq!(response.content, "grounded answer");
}

#[tokio::test]
async fn missing_content_reads_as_empty() {
    let app = Router::new().route(
        "/completion",
        post(|| async { Json(json!({ "stop": true })) }),
    );
    let url = spawn_server(app).await;
    let client = LlamaCppClient::new(url, Duration::from_secs(5)).expect("client");

    let response = client.complete(&request()).await.expect("completion");
    assert!(response.content.is_empty());
}

#[tokio::test]
async fn null_content_reads_as_empty() {
    let app = Router::new().route(
        "/completion",
        post(|| async { Json(json!({ "content": null, "stop": true })) }),
    );
    let url = spawn_server(app).await;
    let client = LlamaCppClient::new(url, Duration::from_secs(5)).expect("client");

    let response = client.complete(&request()).await.expect("completion");
    assert!(response.content.is_empty());
}

#[tokio::test]
async fn non_success_status_is_upstream_error() {
    let app = Router::new().route(
        "/completion",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "slot unavailable") }),
    );
    let url = spawn_server(app).await;
    let client = LlamaCppClient::new(url, Duration::from_secs(5)).expect("client");

    let err = client.complete(&request()).await.unwrap_err();
    match err {
        CompletionError::Upstream(message) => assert!(message.contains("500"), "{message}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn slow_server_is_a_timeout() {
    let app = Router::new().route(
        "/completion",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "content": "too late" }))
        }),
    );
    let url = spawn_server(app).await;
    let client = LlamaCppClient::new(url, Duration::from_millis(200)).expect("client");

    let err = client.complete(&request()).await.unwrap_err();
    assert!(matches!(err, CompletionError::Timeout(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_server_is_upstream_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client =
        LlamaCppClient::new(format!("http://{addr}/completion"), Duration::from_secs(5))
            .expect("client");
    let err = client.complete(&request()).await.unwrap_err();
    assert!(matches!(err, CompletionError::Upstream(_)), "{err:?}");
}
