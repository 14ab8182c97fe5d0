//! Local cache of chat sessions, synchronized with the remote service.

use crate::synced::Synced;
use solace_core::attachment::EncodedAttachment;
use solace_core::chat::{ChatRepository, ChatSession, MessagePair, NewMessage, sort_by_recency};
use solace_core::error::{Result, SolaceError};
use std::sync::Arc;
use tokio::sync::watch;

/// Authoritative local view of the user's chat sessions.
///
/// The cache is a `watch` channel: every change is published to
/// subscribers as a complete, recency-sorted snapshot.
pub struct ChatStore {
    repository: Arc<dyn ChatRepository>,
    sessions: watch::Sender<Vec<ChatSession>>,
}

impl ChatStore {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        let (sessions, _) = watch::channel(Vec::new());
        Self {
            repository,
            sessions,
        }
    }

    /// Receives a snapshot on every change.
    pub fn subscribe(&self) -> watch::Receiver<Vec<ChatSession>> {
        self.sessions.subscribe()
    }

    /// Current snapshot, most recent first.
    pub fn sessions(&self) -> Vec<ChatSession> {
        self.sessions.borrow().clone()
    }

    /// Looks a session up in the last loaded listing.
    pub fn find(&self, chat_id: &str) -> Result<ChatSession> {
        self.sessions
            .borrow()
            .iter()
            .find(|session| session.id == chat_id)
            .cloned()
            .ok_or_else(|| SolaceError::not_found("Chat", chat_id))
    }

    /// Allocates a session on the server.
    ///
    /// Nothing is added locally unless the server returned an id. The new
    /// session is placed by its timestamp like any other.
    pub async fn create_chat(&self, title: &str) -> Result<ChatSession> {
        let session = self.repository.create(title).await?;
        tracing::info!("[ChatStore] Created chat {}", session.id);

        self.sessions.send_modify(|sessions| {
            sessions.retain(|existing| existing.id != session.id);
            sessions.push(session.clone());
            sort_by_recency(sessions);
        });
        Ok(session)
    }

    /// Replaces the cache with the server's listing.
    ///
    /// Any local-only state is discarded; the server wins.
    pub async fn list_chats(&self) -> Result<Vec<ChatSession>> {
        let mut sessions = self.repository.list_all().await?;
        sort_by_recency(&mut sessions);
        tracing::debug!("[ChatStore] Refreshed {} chats", sessions.len());

        self.sessions.send_replace(sessions.clone());
        Ok(sessions)
    }

    /// Sends a message to an existing chat.
    ///
    /// On success the pair is appended to the cached session and the listing
    /// is refreshed, since the server's ordering key changes with every
    /// message. On failure nothing is appended.
    pub async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        attachment: Option<EncodedAttachment>,
    ) -> Result<Synced<MessagePair>> {
        let message = NewMessage {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
            attachment,
        };
        let pair = self.repository.send_message(&message).await?;

        self.sessions.send_modify(|sessions| {
            if let Some(session) = sessions.iter_mut().find(|s| s.id == chat_id) {
                session.messages.push(pair.clone());
            }
        });

        let refresh = self.refresh_after_mutation().await;
        Ok(Synced::new(pair, refresh))
    }

    /// Deletes a session on the server, then refreshes.
    pub async fn delete_chat(&self, chat_id: &str) -> Result<Synced<()>> {
        self.repository.delete(chat_id).await?;
        tracing::info!("[ChatStore] Deleted chat {}", chat_id);

        self.sessions.send_modify(|sessions| {
            sessions.retain(|session| session.id != chat_id);
        });

        let refresh = self.refresh_after_mutation().await;
        Ok(Synced::new((), refresh))
    }

    /// Empties the cache without talking to the server.
    pub fn clear(&self) {
        self.sessions.send_replace(Vec::new());
    }

    async fn refresh_after_mutation(&self) -> Result<()> {
        match self.list_chats().await {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::warn!(
                    "[ChatStore] Refresh after mutation failed, cache is provisional: {}",
                    e
                );
                Err(e)
            }
        }
    }
}
