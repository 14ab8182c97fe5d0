//! Chat request and response bodies.

use super::{WireId, WireTimestamp, resolve_timestamp};
use serde::{Deserialize, Serialize};
use solace_core::chat::{ChatSession, MessagePair, sort_by_recency};

/// `POST /chats` response
#[derive(Debug, Deserialize)]
pub struct CreateChatResponse {
    pub chat_id: WireId,
}

/// `GET /chats` response
#[derive(Debug, Deserialize)]
pub struct ConversationList {
    #[serde(default)]
    pub conversations: Vec<ConversationDto>,
}

#[derive(Debug, Deserialize)]
pub struct ConversationDto {
    pub id: WireId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub timestamp: Option<WireTimestamp>,
    /// `[[user, assistant], ...]`
    #[serde(default)]
    pub messages: Vec<(String, String)>,
}

impl From<ConversationDto> for ChatSession {
    fn from(dto: ConversationDto) -> Self {
        let id = String::from(dto.id);
        let timestamp = resolve_timestamp(dto.timestamp.as_ref(), "chat", &id);
        ChatSession {
            id,
            title: dto.title,
            messages: dto
                .messages
                .into_iter()
                .map(|(user, assistant)| MessagePair::new(user, assistant))
                .collect(),
            timestamp,
        }
    }
}

impl ConversationList {
    /// Domain sessions, most recent first.
    pub fn into_sessions(self) -> Vec<ChatSession> {
        let mut sessions: Vec<ChatSession> =
            self.conversations.into_iter().map(ChatSession::from).collect();
        sort_by_recency(&mut sessions);
        sessions
    }
}

/// `POST /chats/{id}/message` body
#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub message: &'a str,
    pub chat_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64_image: Option<&'a str>,
}

/// `POST /chats/{id}/message` response
#[derive(Debug, Deserialize)]
pub struct SendMessageResponse {
    pub response: String,
}
