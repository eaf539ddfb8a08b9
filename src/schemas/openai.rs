//! OpenAI Chat Completions wire types
//!
//! Only the subset the relay sends or reads. Response types are deliberately
//! lenient: every field is optional so that a malformed body surfaces as an
//! "invalid response structure" error rather than a deserialization failure.

use serde::{Deserialize, Serialize};

// ============================================================================
// Request Types
// ============================================================================

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// Outbound chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Outbound chat completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model ID (e.g., "gpt-4o")
    pub model: String,

    /// Conversation: system instruction followed by the user's prompt
    pub messages: Vec<ChatMessage>,
}

impl ChatCompletionRequest {
    /// Build the two-message conversation the relay always sends
    pub fn for_prompt(model: &str, system_prompt: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(prompt)],
        }
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Chat completion response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// Completion choice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<AssistantMessage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Assistant message in response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ChatRole>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if present and non-empty
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
            .filter(|content| !content.is_empty())
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Error body returned by the provider on failure statuses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAIErrorResponse {
    #[serde(default)]
    pub error: Option<OpenAIErrorDetail>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAIErrorDetail {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<serde_json::Value>,
}

impl OpenAIErrorResponse {
    pub fn message(&self) -> Option<&str> {
        self.error
            .as_ref()
            .and_then(|detail| detail.message.as_deref())
            .filter(|message| !message.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let request = ChatCompletionRequest::for_prompt("gpt-4o", "You are a helpful assistant.", "hi");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "model": "gpt-4o",
                "messages": [
                    { "role": "system", "content": "You are a helpful assistant." },
                    { "role": "user", "content": "hi" }
                ]
            })
        );
    }

    #[test]
    fn test_first_content() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "Hello!" }, "finish_reason": "stop" },
                { "index": 1, "message": { "role": "assistant", "content": "Other" } }
            ],
            "usage": { "prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2 }
        }))
        .unwrap();

        assert_eq!(response.first_content(), Some("Hello!"));
    }

    #[test]
    fn test_first_content_missing() {
        let empty: ChatCompletionResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert_eq!(empty.first_content(), None);

        let no_choices: ChatCompletionResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(no_choices.first_content(), None);

        let null_content: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        }))
        .unwrap();
        assert_eq!(null_content.first_content(), None);

        let blank: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "content": "" } }]
        }))
        .unwrap();
        assert_eq!(blank.first_content(), None);
    }

    #[test]
    fn test_error_message() {
        let parsed: OpenAIErrorResponse = serde_json::from_value(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error", "code": "invalid_api_key" }
        }))
        .unwrap();
        assert_eq!(parsed.message(), Some("Incorrect API key provided"));

        let bare: OpenAIErrorResponse = serde_json::from_value(json!({ "detail": "nope" })).unwrap();
        assert_eq!(bare.message(), None);
    }
}
