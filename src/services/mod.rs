//! Services module
//!
//! Contains the relay logic and the completion provider integration.

use async_trait::async_trait;

use crate::error::RelayError;
use crate::schemas::openai::ChatCompletionRequest;

pub mod openai;
pub mod relay;

pub use openai::{upstream_error_from_body, OpenAIConfig, OpenAIService};
pub use relay::{RelayConfig, RelayService};

/// A chat completion backend.
///
/// Implementations make one attempt per call and return the answer text, or
/// an error already classified as upstream or transport.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<String, RelayError>;
}
