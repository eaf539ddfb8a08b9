//! Shared relay state handed to every handler

use crate::config::Settings;
use crate::services::RelayService;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
///
/// Everything in here is immutable after startup, so cloning per request is
/// just a few `Arc` bumps and no locking is ever needed.
#[derive(Clone)]
pub struct AppState {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Prompt relay, with the provider credential already injected
    pub relay: Arc<RelayService>,

    /// Application start time (for uptime calculation)
    pub start_time: Instant,
}

impl AppState {
    /// Create application state backed by the configured OpenAI endpoint
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        tracing::debug!(
            base_url = %settings.openai_base_url,
            model = %settings.openai_model,
            "Initializing relay service"
        );

        let relay = RelayService::from_settings(&settings)?;
        Ok(Self::with_relay(settings, relay))
    }

    /// Create application state around an already-built relay, e.g. one
    /// backed by a different [`CompletionProvider`](crate::services::CompletionProvider)
    pub fn with_relay(settings: Settings, relay: RelayService) -> Self {
        tracing::info!("Application state initialized successfully");

        Self {
            settings: Arc::new(settings),
            relay: Arc::new(relay),
            start_time: Instant::now(),
        }
    }

    /// Get the application uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
