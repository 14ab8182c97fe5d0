//! Chat session domain model.

use crate::attachment::EncodedAttachment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title used when a chat is created implicitly or from the "new chat" action.
pub const DEFAULT_CHAT_TITLE: &str = "New Conversation";

/// One user turn and the assistant's reply to it.
///
/// A pair is only ever committed as a unit: a user message without its
/// reply never enters a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePair {
    /// What the user sent. Empty when only an image was attached.
    pub user_text: String,
    /// The assistant's reply
    pub assistant_text: String,
}

impl MessagePair {
    pub fn new(user_text: impl Into<String>, assistant_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            assistant_text: assistant_text.into(),
        }
    }
}

/// A chat session as known to the client.
///
/// Sessions only exist locally once the server has assigned them an id;
/// there is no client-side "pending" session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    /// Server-assigned identifier, immutable once created
    pub id: String,
    /// Human-readable session title
    pub title: String,
    /// Conversation in order, append-only from the client's perspective
    pub messages: Vec<MessagePair>,
    /// Last-modified instant, server-assigned
    pub timestamp: DateTime<Utc>,
}

impl ChatSession {
    /// A freshly allocated session with no messages.
    pub fn empty(id: impl Into<String>, title: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            messages: Vec::new(),
            timestamp,
        }
    }
}

/// An outgoing message for an existing chat.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub chat_id: String,
    pub text: String,
    pub attachment: Option<EncodedAttachment>,
}

/// Sorts sessions most recent first.
pub fn sort_by_recency(sessions: &mut [ChatSession]) {
    sessions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
