//! OpenAI service for chat completion calls
//!
//! This module performs the single outbound request of a relay call and
//! turns the provider's answer (or failure) into a plain string or a
//! classified [`RelayError`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::error::RelayError;
use crate::schemas::openai::{ChatCompletionRequest, ChatCompletionResponse, OpenAIErrorResponse};
use crate::services::CompletionProvider;
use crate::utils::truncate_with_suffix;

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Upstream bodies are cut to this many characters in logs
const MAX_LOGGED_BODY_CHARS: usize = 2000;

/// Configuration for the OpenAI service
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API base, e.g. `https://api.openai.com/v1`
    pub base_url: String,

    /// Whole-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl OpenAIConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Client for the OpenAI Chat Completions endpoint
#[derive(Clone)]
pub struct OpenAIService {
    client: Client,
    url: String,
}

impl OpenAIService {
    pub fn new(config: OpenAIConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let url = format!(
            "{}{}",
            config.base_url.trim_end_matches('/'),
            CHAT_COMPLETIONS_PATH
        );

        tracing::debug!(url = %url, timeout = ?config.timeout, "Initialized OpenAI service");

        Ok(Self {
            client: builder.build()?,
            url,
        })
    }

    /// Full endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CompletionProvider for OpenAIService {
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<String, RelayError> {
        tracing::debug!(url = %self.url, model = %request.model, "Calling OpenAI chat completions API");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, url = %self.url, "OpenAI API request failed");
                RelayError::Transport(format!("Failed to reach OpenAI API: {}", e))
            })?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "OpenAI API call completed");

        if !status.is_success() {
            let error_text = response.text().await?;
            tracing::error!(
                status = status.as_u16(),
                body = %truncate_with_suffix(&error_text, MAX_LOGGED_BODY_CHARS, "..."),
                "OpenAI API returned an error status"
            );
            return Err(upstream_error_from_body(status, &error_text));
        }

        let body = response.text().await?;

        let parsed: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %truncate_with_suffix(&body, MAX_LOGGED_BODY_CHARS, "..."),
                "Failed to parse OpenAI response"
            );
            RelayError::invalid_upstream_response()
        })?;

        match parsed.first_content() {
            Some(content) => Ok(content.to_string()),
            None => {
                tracing::error!(
                    body = %truncate_with_suffix(&body, MAX_LOGGED_BODY_CHARS, "..."),
                    "Invalid response structure from OpenAI API"
                );
                Err(RelayError::invalid_upstream_response())
            }
        }
    }
}

/// Classify a failure body from the provider.
///
/// Prefers the provider's own `error.message`; falls back to the status code
/// for JSON bodies without one, and to the raw text for non-JSON bodies.
pub fn upstream_error_from_body(status: StatusCode, body: &str) -> RelayError {
    let value = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value,
        Err(_) => {
            return RelayError::Upstream(format!("OpenAI API returned non-JSON error: {}", body));
        }
    };

    let message = serde_json::from_value::<OpenAIErrorResponse>(value)
        .ok()
        .and_then(|parsed| parsed.message().map(str::to_string));

    RelayError::Upstream(message.unwrap_or_else(|| {
        format!("OpenAI API request failed with status {}", status.as_u16())
    }))
}
