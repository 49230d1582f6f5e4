use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[allow(deprecated)]
fn docqa(docs_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("docqa").expect("binary");
    cmd.env("DOCQA_EMBEDDING_MODE", "stub")
        .env("DOCQA_EMBEDDING_DIM", "32")
        .env_remove("DOCQA_CHUNK_SIZE")
        .env_remove("DOCQA_OVERLAP")
        .env_remove("DOCQA_TOP_K")
        .arg("--docs-dir")
        .arg(docs_dir);
    cmd
}

#[test]
fn ingest_json_reports_documents_and_chunks() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("a.txt"), "Embeddings convert text into vectors.").unwrap();
    fs::write(temp.path().join("b.txt"), "FAISS is used for similarity search.").unwrap();
    fs::write(temp.path().join("notes.md"), "# not ingested").unwrap();
    fs::write(temp.path().join("empty.txt"), "   \n").unwrap();

    let output = docqa(temp.path())
        .args(["ingest", "--json"])
        .output()
        .expect("command run");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["documents"], 2);
    assert_eq!(body["chunks"], 2);
}

#[test]
fn small_chunks_from_env_split_documents() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("a.txt"), "a b c d e f g h").unwrap();

    let output = docqa(temp.path())
        .env("DOCQA_CHUNK_SIZE", "5")
        .env("DOCQA_OVERLAP", "2")
        .args(["ingest", "--json"])
        .output()
        .expect("command run");

    assert!(output.status.success());
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["chunks"], 2);
}

#[test]
fn missing_documents_folder_fails() {
    let temp = tempdir().unwrap();
    docqa(&temp.path().join("missing"))
        .args(["ingest"])
        .assert()
        .failure()
        .stderr(contains("Documents folder not found"));
}

#[test]
fn overlap_not_below_chunk_size_is_rejected() {
    let temp = tempdir().unwrap();
    docqa(temp.path())
        .env("DOCQA_CHUNK_SIZE", "10")
        .env("DOCQA_OVERLAP", "10")
        .args(["ingest"])
        .assert()
        .failure()
        .stderr(contains("overlap (10) must be smaller than chunk_size (10)"));
}

#[test]
fn ask_without_documents_does_not_know() {
    let temp = tempdir().unwrap();

    // Unroutable completion endpoint: nothing retrieved means it is never called.
    let output = docqa(temp.path())
        .args(["--llm-url", "http://127.0.0.1:9/completion"])
        .args(["ask", "What is RAG?"])
        .output()
        .expect("command run");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["question"], "What is RAG?");
    assert_eq!(body["answer"], "I don't know.");
    assert_eq!(body["context"], Value::Array(vec![]));
}

#[test]
fn ask_reports_unreachable_completion_service() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("rag.txt"), "RAG combines retrieval and generation.").unwrap();

    docqa(temp.path())
        .env("DOCQA_LLM_TIMEOUT_SECS", "5")
        .args(["--llm-url", "http://127.0.0.1:9/completion"])
        .args(["ask", "RAG combines retrieval and generation."])
        .assert()
        .failure()
        .stderr(contains("Upstream error"));
}
