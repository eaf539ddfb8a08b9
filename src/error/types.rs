//! Relay error types
//!
//! Every failure of a relay call is classified where it happens. The variant
//! decides the HTTP status; the message text never does.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::schemas::relay::ErrorBody;

/// Message returned when the request carries no usable prompt
pub const PROMPT_REQUIRED: &str = "Prompt is required.";

/// Message returned when no provider credential is configured
pub const API_KEY_REQUIRED: &str = "API key is required.";

/// Message returned when a successful upstream response has no answer
pub const INVALID_UPSTREAM_RESPONSE: &str = "Invalid response structure from OpenAI API";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// Malformed or missing client input
    #[error("{0}")]
    Validation(String),

    /// Missing server-side configuration
    #[error("{0}")]
    Configuration(String),

    /// Provider returned a failure status or an unusable body
    #[error("{0}")]
    Upstream(String),

    /// Network failure reaching the provider
    #[error("{0}")]
    Transport(String),
}

impl RelayError {
    pub fn prompt_required() -> Self {
        RelayError::Validation(PROMPT_REQUIRED.to_string())
    }

    pub fn api_key_required() -> Self {
        RelayError::Configuration(API_KEY_REQUIRED.to_string())
    }

    pub fn invalid_upstream_response() -> Self {
        RelayError::Upstream(INVALID_UPSTREAM_RESPONSE.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Validation(_) | RelayError::Configuration(_) => StatusCode::BAD_REQUEST,
            RelayError::Upstream(_) | RelayError::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short label used in structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Validation(_) => "validation_error",
            RelayError::Configuration(_) => "configuration_error",
            RelayError::Upstream(_) => "upstream_error",
            RelayError::Transport(_) => "transport_error",
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Transport(err.to_string())
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
