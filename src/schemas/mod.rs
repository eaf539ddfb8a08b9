//! API schema definitions
//!
//! Relay request/result bodies and the completion provider's wire format.

pub mod openai;
pub mod relay;

pub use openai::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRole};
pub use relay::{CompletionBody, ErrorBody, PromptRequest};
