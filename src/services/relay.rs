//! Relay service
//!
//! Validates a prompt request, attaches the configured credential, asks the
//! completion provider for an answer and returns it. The service holds no
//! mutable state; a single instance serves all requests concurrently.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Settings;
use crate::error::RelayError;
use crate::schemas::openai::ChatCompletionRequest;
use crate::schemas::relay::PromptRequest;
use crate::services::openai::{OpenAIConfig, OpenAIService};
use crate::services::CompletionProvider;

/// Values the relay needs at request time
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub system_prompt: String,
    pub log_prompts: bool,
}

impl RelayConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            api_key: settings.openai_api_key.clone(),
            model: settings.openai_model.clone(),
            system_prompt: settings.system_prompt.clone(),
            log_prompts: settings.log_prompts,
        }
    }
}

pub struct RelayService {
    config: RelayConfig,
    provider: Arc<dyn CompletionProvider>,
}

impl RelayService {
    pub fn new(config: RelayConfig, provider: Arc<dyn CompletionProvider>) -> Self {
        Self { config, provider }
    }

    /// Build a relay backed by the real OpenAI endpoint from settings
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let mut openai_config = OpenAIConfig::new(settings.openai_base_url.clone());
        if let Some(seconds) = settings.upstream_timeout_seconds {
            openai_config = openai_config.with_timeout(Duration::from_secs(seconds));
        }

        let provider = OpenAIService::new(openai_config)?;

        Ok(Self::new(
            RelayConfig::from_settings(settings),
            Arc::new(provider),
        ))
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Relay one prompt to the completion provider.
    ///
    /// Checks run in order and the first failure wins: the prompt must be
    /// non-empty, then a credential must be configured. Exactly one
    /// provider call is made when both pass.
    pub async fn complete_chat(&self, request: &PromptRequest) -> Result<String, RelayError> {
        let prompt = request.require_prompt().map_err(|e| {
            tracing::error!("Prompt is missing in the request body");
            e
        })?;

        if self.config.log_prompts {
            tracing::info!(prompt = %prompt, "Received prompt");
        } else {
            tracing::info!(prompt_chars = prompt.chars().count(), "Received prompt");
        }

        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => {
                tracing::error!("OPENAI_API_KEY is missing from configuration");
                return Err(RelayError::api_key_required());
            }
        };

        let completion_request = ChatCompletionRequest::for_prompt(
            &self.config.model,
            &self.config.system_prompt,
            prompt,
        );

        let answer = self
            .provider
            .complete(api_key, &completion_request)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    kind = e.kind(),
                    model = %self.config.model,
                    "Relay call failed"
                );
                e
            })?;

        tracing::info!(
            model = %self.config.model,
            response_chars = answer.chars().count(),
            "OpenAI API success response received"
        );

        Ok(answer)
    }
}
