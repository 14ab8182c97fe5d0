//! Journal repository trait.

use super::model::{JournalEntry, JournalUpdate};
use crate::error::Result;
use async_trait::async_trait;

/// Remote journal storage and sentiment analysis.
#[async_trait]
pub trait JournalRepository: Send + Sync {
    /// Lists every stored entry, in whatever order the server returns.
    async fn list_all(&self) -> Result<Vec<JournalEntry>>;

    /// Stores a new entry.
    async fn create(&self, content: &str) -> Result<JournalEntry>;

    /// Replaces the content (and analysis, if given) of an existing entry.
    async fn update(&self, entry_id: &str, update: &JournalUpdate) -> Result<JournalEntry>;

    /// Deletes an entry.
    async fn delete(&self, entry_id: &str) -> Result<()>;

    /// Runs sentiment analysis on arbitrary content. Nothing is stored.
    async fn analyze(&self, content: &str) -> Result<String>;
}
