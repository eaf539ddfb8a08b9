//! Health check endpoints
//!
//! This module provides health check endpoints for monitoring
//! and container orchestration.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::state::AppState;

/// Response for the main health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub uptime_seconds: u64,
    pub model: String,
    /// Whether a provider credential is configured. Without one every chat
    /// request is answered with a 400, but the process itself is healthy.
    pub api_key_configured: bool,
}

/// Response for liveness probe
#[derive(Serialize)]
pub struct LivenessResponse {
    pub alive: bool,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.settings.app_version.clone(),
        environment: state.settings.environment.to_string(),
        uptime_seconds: state.uptime_seconds(),
        model: state.relay.model().to_string(),
        api_key_configured: state.relay.has_api_key(),
    })
}

/// GET /liveness
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { alive: true })
}

#[cfg(test)]
mod tests {
    use crate::config::Settings;
    use crate::server::{routes::create_router, state::AppState};
    use axum::{body::Body, http::Request, http::StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get(uri: &str, settings: Settings) -> (StatusCode, Value) {
        let router = create_router(AppState::new(settings).unwrap());
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_missing_key() {
        let (status, body) = get("/health", Settings::default()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["api_key_configured"], false);
    }

    #[tokio::test]
    async fn test_health_reports_configured_key() {
        let mut settings = Settings::default();
        settings.openai_api_key = Some("sk-test".to_string());

        let (_, body) = get("/health", settings).await;
        assert_eq!(body["api_key_configured"], true);
    }

    #[tokio::test]
    async fn test_liveness() {
        let (status, body) = get("/liveness", Settings::default()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["alive"], true);
    }
}
