//! Error types

pub mod types;

pub use types::{RelayError, API_KEY_REQUIRED, INVALID_UPSTREAM_RESPONSE, PROMPT_REQUIRED};
