//! Relay request and result bodies
//!
//! These are the only shapes exchanged between the relay client and server.

use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// Inbound body of `POST /api/chat`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

impl PromptRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
        }
    }

    /// Interpret an arbitrary JSON document as a prompt request.
    ///
    /// Anything that is not an object with a string `prompt` (a number, an
    /// array, `null`) is treated as carrying no prompt.
    pub fn from_value(value: serde_json::Value) -> Self {
        let prompt = match value {
            serde_json::Value::Object(mut map) => match map.remove("prompt") {
                Some(serde_json::Value::String(prompt)) => Some(prompt),
                _ => None,
            },
            _ => None,
        };

        Self { prompt }
    }

    /// The prompt text, or a validation error if absent or empty
    pub fn require_prompt(&self) -> Result<&str, RelayError> {
        match self.prompt.as_deref() {
            Some(prompt) if !prompt.is_empty() => Ok(prompt),
            _ => Err(RelayError::prompt_required()),
        }
    }
}

/// Successful relay result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionBody {
    pub response: String,
}

/// Failed relay result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_prompt() {
        assert_eq!(PromptRequest::new("hello").require_prompt(), Ok("hello"));
        assert_eq!(
            PromptRequest::new("").require_prompt(),
            Err(RelayError::prompt_required())
        );
        assert_eq!(
            PromptRequest::default().require_prompt(),
            Err(RelayError::prompt_required())
        );
    }

    #[test]
    fn test_whitespace_prompt_is_accepted() {
        // Only emptiness is checked; content is forwarded untouched.
        assert_eq!(PromptRequest::new("  ").require_prompt(), Ok("  "));
    }

    #[test]
    fn test_from_value() {
        assert_eq!(
            PromptRequest::from_value(json!({ "prompt": "hi", "extra": 1 })),
            PromptRequest::new("hi")
        );
        assert_eq!(PromptRequest::from_value(json!({})), PromptRequest::default());
        assert_eq!(PromptRequest::from_value(json!({ "prompt": 42 })), PromptRequest::default());
        assert_eq!(PromptRequest::from_value(json!({ "prompt": null })), PromptRequest::default());
        assert_eq!(PromptRequest::from_value(json!(["prompt"])), PromptRequest::default());
    }

    #[test]
    fn test_result_bodies_are_exclusive() {
        let ok = serde_json::to_value(CompletionBody { response: "a".into() }).unwrap();
        assert_eq!(ok, json!({ "response": "a" }));

        let err = serde_json::to_value(ErrorBody { error: "b".into() }).unwrap();
        assert_eq!(err, json!({ "error": "b" }));
    }
}
