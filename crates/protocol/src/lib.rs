use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Body of `POST /query`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct QueryRequest {
    pub question: String,
    /// Overrides the server's default number of context chunks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<usize>,
}

/// Answer with the context chunks it was grounded on, best first
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct QueryResponse {
    pub question: String,
    pub answer: String,
    pub context: Vec<String>,
    pub scores: Vec<f32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Chunks currently held by the store
    pub chunks: usize,
}

impl HealthResponse {
    pub fn ok(chunks: usize) -> Self {
        Self {
            status: "ok".to_string(),
            chunks,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct IngestResponse {
    pub documents: usize,
    pub chunks: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            hint: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

pub fn serialize_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn query_request_top_k_is_optional() {
        let request: QueryRequest =
            serde_json::from_str(r#"{"question":"What is RAG?"}"#).unwrap();
        assert_eq!(request.question, "What is RAG?");
        assert_eq!(request.top_k, None);

        let request: QueryRequest =
            serde_json::from_str(r#"{"question":"q","top_k":5}"#).unwrap();
        assert_eq!(request.top_k, Some(5));
    }

    #[test]
    fn query_request_rejects_negative_top_k() {
        let result = serde_json::from_str::<QueryRequest>(r#"{"question":"q","top_k":-1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn error_envelope_omits_missing_hint() {
        let raw = serialize_json(&ErrorEnvelope::new("upstream_timeout", "slow")).unwrap();
        assert_eq!(raw, r#"{"code":"upstream_timeout","message":"slow"}"#);

        let raw = serialize_json(&ErrorEnvelope::new("x", "y").with_hint("z")).unwrap();
        assert_eq!(raw, r#"{"code":"x","message":"y","hint":"z"}"#);
    }

    #[test]
    fn query_response_field_order() {
        let response = QueryResponse {
            question: "q".to_string(),
            answer: "I don't know.".to_string(),
            context: vec![],
            scores: vec![],
        };
        assert_eq!(
            serialize_json(&response).unwrap(),
            r#"{"question":"q","answer":"I don't know.","context":[],"scores":[]}"#
        );
    }
}
