//! HTTP client for the relay's `/api/chat` endpoint

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::schemas::relay::PromptRequest;

const CHAT_PATH: &str = "/api/chat";

/// Placeholder used when a failed relay response has an empty body
pub const NO_ERROR_MESSAGE: &str = "No error message provided";

/// Failures a client can show to the user. Each renders as a single line
/// suitable for an error banner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("API route failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("API route returned success status but JSON response is missing the \"response\" field.")]
    MissingResponse,

    #[error("API route returned invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Failed to reach relay server: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

/// Anything that can turn a prompt into an answer for a [`super::ChatSession`]
#[async_trait]
pub trait PromptTransport: Send + Sync {
    async fn send_prompt(&self, prompt: &str) -> Result<String, ClientError>;
}

/// Talks to a running relay server over HTTP
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: Client,
    endpoint: String,
}

impl RelayClient {
    /// `server_url` is the relay's origin, e.g. `http://localhost:3000`
    pub fn new(server_url: &str) -> Self {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}{}", server_url.trim_end_matches('/'), CHAT_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PromptTransport for RelayClient {
    async fn send_prompt(&self, prompt: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&PromptRequest::new(prompt))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "API route response status");

        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), body = %body, "API route error response");
            let message = if body.is_empty() {
                NO_ERROR_MESSAGE.to_string()
            } else {
                body
            };
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let data: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ClientError::InvalidJson(e.to_string()))?;

        match data.get("response").and_then(|v| v.as_str()) {
            Some(answer) if !answer.is_empty() => Ok(answer.to_string()),
            _ => Err(ClientError::MissingResponse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_endpoint() {
        assert_eq!(
            RelayClient::new("http://localhost:3000/").endpoint(),
            "http://localhost:3000/api/chat"
        );
    }

    #[tokio::test]
    async fn test_send_prompt_success() {
        let server = MockServer::start_async().await;
        let mock = server.mock_async(|when, then| {
            when.method(POST)
                .path("/api/chat")
                .json_body(json!({ "prompt": "Tell me a joke" }));
            then.status(200).json_body(json!({ "response": "Why did the crab..." }));
        }).await;

        let answer = RelayClient::new(&server.base_url())
            .send_prompt("Tell me a joke")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(answer, "Why did the crab...");
    }

    #[tokio::test]
    async fn test_send_prompt_error_status_uses_body_text() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(POST).path("/api/chat");
            then.status(400).body(r#"{"error":"Prompt is required."}"#);
        }).await;

        let err = RelayClient::new(&server.base_url())
            .send_prompt("")
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            r#"API route failed with status 400: {"error":"Prompt is required."}"#
        );
    }

    #[tokio::test]
    async fn test_send_prompt_error_status_empty_body() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(POST).path("/api/chat");
            then.status(500);
        }).await;

        let err = RelayClient::new(&server.base_url())
            .send_prompt("hi")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ClientError::Status {
                status: 500,
                message: NO_ERROR_MESSAGE.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_send_prompt_missing_response_field() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(POST).path("/api/chat");
            then.status(200).json_body(json!({ "answer": "wrong field" }));
        }).await;

        let err = RelayClient::new(&server.base_url())
            .send_prompt("hi")
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::MissingResponse);
    }

    #[tokio::test]
    async fn test_send_prompt_invalid_json() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(POST).path("/api/chat");
            then.status(200).body("<html>");
        }).await;

        let err = RelayClient::new(&server.base_url())
            .send_prompt("hi")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn test_send_prompt_unreachable() {
        let err = RelayClient::new("http://127.0.0.1:9")
            .send_prompt("hi")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
