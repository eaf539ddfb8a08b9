//! Prompt relay library
//!
//! Forwards a single user prompt to an OpenAI-compatible chat completion API
//! and returns either the answer or one normalized error.

// Public modules
pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod schemas;
pub mod server;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use error::RelayError;
pub use server::App;
