//! Chat transcript types.
//!
//! Chat history is never stored on its own. These types are derived from
//! chat-category records of the interaction log.

use serde::{Deserialize, Serialize};

/// Who sent a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The person typing.
    User,
    /// The backend's reply.
    Agent,
}

/// A single message in a chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    /// Message timestamp (ms since Unix epoch)
    pub timestamp: i64,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            timestamp,
        }
    }

    pub fn agent(text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            role: ChatRole::Agent,
            text: text.into(),
            timestamp,
        }
    }
}

/// The user/agent pair synthesized from one chat record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatExchange {
    pub user: ChatMessage,
    pub agent: ChatMessage,
}

impl ChatExchange {
    /// Messages in transcript order.
    pub fn into_messages(self) -> [ChatMessage; 2] {
        [self.user, self.agent]
    }
}
