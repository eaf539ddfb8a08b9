//! Chat relay endpoint
//!
//! POST /api/chat accepts `{ "prompt": string }` and answers with either
//! `{ "response": string }` or `{ "error": string }`.

use axum::{body::Bytes, extract::State, Extension, Json};

use crate::error::RelayError;
use crate::middleware::TraceId;
use crate::schemas::relay::{CompletionBody, PromptRequest};
use crate::server::state::AppState;

/// POST /api/chat - relay one prompt to the completion provider
///
/// The body is parsed as JSON whatever `Content-Type` says. A body that is
/// not valid JSON is a validation failure, reported before any other check.
pub async fn complete_chat(
    State(state): State<AppState>,
    trace_id: Option<Extension<TraceId>>,
    body: Bytes,
) -> Result<Json<CompletionBody>, RelayError> {
    let trace_id = trace_id.map(|Extension(id)| id).unwrap_or_default();

    let value: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(trace_id = %trace_id, error = %e, "Failed to parse request body");
        RelayError::Validation(e.to_string())
    })?;

    let request = PromptRequest::from_value(value);
    let response = state.relay.complete_chat(&request).await.map_err(|e| {
        tracing::error!(trace_id = %trace_id, status = e.status_code().as_u16(), error = %e, "Chat relay failed");
        e
    })?;

    Ok(Json(CompletionBody { response }))
}
