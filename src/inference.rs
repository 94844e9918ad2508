use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Hosted text-generation endpoint used when no override is configured.
pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/facebook/blenderbot-400M-distill";

/// The endpoint has no server-side bound on generation time; without a
/// client-side timeout a dead connection would leave the chat loading
/// forever. Timeouts surface as `Transport` errors.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Error)]
pub enum InferenceError {
    /// The endpoint answered with a non-success status (401, 429, 503, ...).
    #[error("inference endpoint rejected the request: {0}")]
    Rejected(StatusCode),
    /// The request never produced a usable response: connection refused,
    /// DNS failure, timeout, or an unreadable body.
    #[error("inference request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The background task running the request was lost.
    #[error("inference task failed")]
    TaskFailed,
}

/// Thin client for the Hugging Face text-generation API.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl InferenceClient {
    pub fn new(endpoint: &str, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            token,
        }
    }

    /// Send one generation request. `Ok(Some(text))` is a usable reply,
    /// `Ok(None)` means the endpoint returned 2xx but the body did not
    /// carry a `generated_text` field. At most one request per call, no
    /// retries.
    pub async fn generate(&self, input: &str) -> Result<Option<String>, InferenceError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .json(&GenerateRequest { inputs: input });

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "inference endpoint rejected request");
            return Err(InferenceError::Rejected(status));
        }

        let body: Value = response.json().await?;
        Ok(extract_generated_text(&body))
    }
}

/// Success responses look like `[{"generated_text": "..."}]`. Anything
/// else yields `None`.
fn extract_generated_text(body: &Value) -> Option<String> {
    body.get(0)?
        .get("generated_text")?
        .as_str()
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_generated_text_from_expected_shape() {
        let body = json!([{ "generated_text": "Sure, one pizza coming up!" }]);
        assert_eq!(
            extract_generated_text(&body).as_deref(),
            Some("Sure, one pizza coming up!")
        );
    }

    #[test]
    fn unexpected_shapes_yield_none() {
        for body in [
            json!([]),
            json!([{ "text": "wrong field" }]),
            json!([{ "generated_text": 42 }]),
            json!({ "generated_text": "not an array" }),
            json!("just a string"),
            json!(null),
        ] {
            assert_eq!(extract_generated_text(&body), None, "body: {body}");
        }
    }

    #[test]
    fn request_body_serializes_raw_input() {
        let request = GenerateRequest { inputs: "  I want a pizza  " };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({ "inputs": "  I want a pizza  " }));
    }
}
