//! Signed-in account panel
//!
//! Identity and message history live in external services. The front-end
//! only needs two questions answered, expressed as [`AuthProvider`] and
//! [`MessageStore`], so it can be driven by any backend or by fakes.

use serde::{Deserialize, Serialize};

pub trait AuthProvider: Send + Sync {
    fn is_authenticated(&self) -> bool;
}

pub trait MessageStore: Send + Sync {
    /// Messages of the current user, or `None` while still loading
    fn current_user_messages(&self) -> Option<Vec<StoredMessage>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub author: String,
    pub body: String,
}

/// Fixed authentication answer
#[derive(Debug, Clone, Copy)]
pub struct StaticAuth(pub bool);

impl AuthProvider for StaticAuth {
    fn is_authenticated(&self) -> bool {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageStore {
    messages: Option<Vec<StoredMessage>>,
}

impl InMemoryMessageStore {
    /// A store whose query has not resolved yet
    pub fn loading() -> Self {
        Self { messages: None }
    }

    pub fn with_messages(messages: Vec<StoredMessage>) -> Self {
        Self {
            messages: Some(messages),
        }
    }
}

impl MessageStore for InMemoryMessageStore {
    fn current_user_messages(&self) -> Option<Vec<StoredMessage>> {
        self.messages.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountPanel {
    SignedOut,
    SignedIn { message_count: Option<usize> },
}

impl AccountPanel {
    /// The message store is only queried for signed-in users.
    pub fn resolve(auth: &dyn AuthProvider, store: &dyn MessageStore) -> Self {
        if !auth.is_authenticated() {
            return AccountPanel::SignedOut;
        }

        AccountPanel::SignedIn {
            message_count: store.current_user_messages().map(|messages| messages.len()),
        }
    }

    pub fn render(&self) -> String {
        match self {
            AccountPanel::SignedOut => "Sign in".to_string(),
            AccountPanel::SignedIn {
                message_count: Some(count),
            } => format!("Authenticated content: {}", count),
            AccountPanel::SignedIn { message_count: None } => "Authenticated content: ".to_string(),
        }
    }
}
