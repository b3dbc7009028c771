//! Message types for chat conversations.
//!
//! A conversation transcript is an ordered sequence of role-tagged
//! messages. Insertion order is the only ordering guarantee; there are
//! no timestamps in the persisted format.

use serde::{Deserialize, Serialize};

// ===== Role =====

/// Author of a message in a conversation.
///
/// Serialized lowercase in the on-disk transcript format. `"system"` is
/// accepted as an alias for [`Role::Assistant`] on read because the
/// legacy client recorded model replies under that role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message typed by the user
    User,
    /// Message returned by the model
    #[serde(alias = "system")]
    Assistant,
}

impl Role {
    /// Wire name of this role (`"user"` / `"assistant"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

// ===== Message =====

/// A single turn in a conversation.
///
/// Immutable once appended. The serialized form is exactly
/// `{"role": ..., "content": ...}`, matching the raw-array transcript
/// files and the chat-completion request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who authored this message
    role: Role,
    /// Message body as typed or as returned by the model
    content: String,
}

impl Message {
    /// Create a new message.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Shorthand for a user-authored message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Shorthand for an assistant-authored message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Message author role
    pub fn role(&self) -> Role {
        self.role
    }

    /// Message body
    pub fn content(&self) -> &str {
        &self.content
    }
}

// ===== Tests =====
