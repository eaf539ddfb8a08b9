//! Relay client
//!
//! Front-end side of the relay: an HTTP client for `/api/chat`, the prompt
//! form state it drives, and the signed-in account panel.

pub mod account;
pub mod relay_client;
pub mod session;

pub use account::{AccountPanel, AuthProvider, InMemoryMessageStore, MessageStore, StaticAuth, StoredMessage};
pub use relay_client::{ClientError, PromptTransport, RelayClient};
pub use session::{ChatSession, Submission, View};
