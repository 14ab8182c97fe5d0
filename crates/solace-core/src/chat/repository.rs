//! Chat repository trait.
//!
//! Defines the interface to the remote chat resource.

use super::model::{ChatSession, MessagePair, NewMessage};
use crate::error::Result;
use async_trait::async_trait;

/// Remote chat storage.
///
/// The remote service owns durable storage; implementations translate these
/// calls into requests and never retry on their own, since creating a chat
/// or sending a message is not idempotent.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Allocates a new, empty session on the server.
    ///
    /// # Returns
    ///
    /// - `Ok(ChatSession)`: The session with its server-assigned id
    /// - `Err(_)`: Transport, status or decode failure
    async fn create(&self, title: &str) -> Result<ChatSession>;

    /// Lists every stored session, in whatever order the server returns.
    async fn list_all(&self) -> Result<Vec<ChatSession>>;

    /// Deletes a session.
    async fn delete(&self, chat_id: &str) -> Result<()>;

    /// Sends a user message and returns the committed pair.
    async fn send_message(&self, message: &NewMessage) -> Result<MessagePair>;
}
