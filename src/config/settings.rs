//! Application settings and configuration
//!
//! This module provides configuration management for the relay server,
//! loading settings from environment variables with sensible defaults.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Default completion provider endpoint base
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model used for every relayed prompt
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

/// System instruction sent ahead of the user's prompt
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Application environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    #[value(alias = "dev")]
    Development,
    #[value(alias = "stage")]
    Staging,
    #[value(alias = "prod")]
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => anyhow::bail!("Invalid environment: {}. Expected: development, staging, or production", s),
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    // App settings
    pub app_name: String,
    pub app_version: String,
    pub environment: Environment,
    pub log_level: String,

    // Server settings
    pub host: String,
    pub port: u16,

    // Completion provider settings
    /// Bearer credential for the completion provider. A missing key is not a
    /// startup failure; every relay call reports it to the caller instead.
    #[serde(skip_serializing)]
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub system_prompt: String,

    /// Upstream request timeout. `None` leaves the call unbounded.
    pub upstream_timeout_seconds: Option<u64>,

    // Debug options
    /// Include prompt text in request logs
    #[serde(default)]
    pub log_prompts: bool,
}

impl Settings {
    /// Load settings from environment variables with defaults
    ///
    /// Call [`Settings::validate`] once any command-line overrides have been
    /// applied.
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignored in production typically)
        dotenvy::dotenv().ok();

        let upstream_timeout_seconds = match env::var("UPSTREAM_TIMEOUT_SECONDS") {
            Ok(raw) => Some(
                raw.parse::<u64>()
                    .context("Invalid UPSTREAM_TIMEOUT_SECONDS value")?,
            ),
            Err(_) => None,
        };

        let settings = Self {
            app_name: env_or_default("APP_NAME", "prompt-relay"),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: env_or_default("ENVIRONMENT", "development")
                .parse()
                .unwrap_or_default(),
            log_level: env_or_default("LOG_LEVEL", "info"),

            host: env_or_default("HOST", "0.0.0.0"),
            port: env_or_default("PORT", "3000")
                .parse()
                .context("Invalid PORT value")?,

            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_base_url: env_or_default("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            openai_model: env_or_default("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            system_prompt: env_or_default("SYSTEM_PROMPT", DEFAULT_SYSTEM_PROMPT),
            upstream_timeout_seconds,

            log_prompts: env_or_default("LOG_PROMPTS", "false")
                .parse()
                .unwrap_or(false),
        };

        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("Port cannot be 0");
        }

        if self.openai_model.trim().is_empty() {
            anyhow::bail!("OPENAI_MODEL cannot be empty");
        }

        if !self.openai_base_url.starts_with("http://")
            && !self.openai_base_url.starts_with("https://")
        {
            anyhow::bail!(
                "OPENAI_BASE_URL must be an http(s) URL, got: {}",
                self.openai_base_url
            );
        }

        if self.upstream_timeout_seconds == Some(0) {
            anyhow::bail!("UPSTREAM_TIMEOUT_SECONDS must be > 0 when set");
        }

        // The server still starts; each relay call answers with a 400 instead.
        if self.openai_api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set; chat requests will be rejected");
        }

        if self.environment == Environment::Production && self.log_prompts {
            tracing::warn!("Prompt logging is enabled in production!");
        }

        Ok(())
    }

    /// Get the server address string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// First characters of the credential, for startup diagnostics only
    pub fn masked_api_key(&self) -> String {
        match &self.openai_api_key {
            Some(key) => format!("{}...", crate::utils::truncate_str(key, 5)),
            None => "Not Found".to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "prompt-relay".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: Environment::Development,
            log_level: "info".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            upstream_timeout_seconds: None,
            log_prompts: false,
        }
    }
}

/// Helper function to get environment variable with default
fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.app_name, "prompt-relay");
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.openai_model, "gpt-4o");
        assert_eq!(settings.system_prompt, "You are a helpful assistant.");
        assert!(settings.openai_api_key.is_none());
        assert!(settings.upstream_timeout_seconds.is_none());
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("development".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("production".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn test_environment_defaults_to_development() {
        assert_eq!(Environment::default(), Environment::Development);
        assert_eq!("unknown".parse::<Environment>().unwrap_or_default(), Environment::Development);
    }

    #[test]
    fn test_server_addr() {
        let settings = Settings::default();
        assert_eq!(settings.server_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.port = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.openai_base_url = "api.openai.com".to_string();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.upstream_timeout_seconds = Some(0);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_api_key_is_not_fatal() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_masked_api_key() {
        let mut settings = Settings::default();
        assert_eq!(settings.masked_api_key(), "Not Found");

        settings.openai_api_key = Some("sk-abcdefghijkl".to_string());
        assert_eq!(settings.masked_api_key(), "sk-ab...");
    }

    #[test]
    fn test_api_key_never_serialized() {
        let mut settings = Settings::default();
        settings.openai_api_key = Some("sk-secret".to_string());
        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("sk-secret"));
    }
}
