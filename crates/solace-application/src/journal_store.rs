//! Local cache of journal entries, synchronized with the remote service.

use crate::synced::Synced;
use solace_core::error::{Result, SolaceError};
use solace_core::journal::{
    JournalEntry, JournalRepository, JournalUpdate, require_content, sort_by_recency,
};
use std::sync::Arc;
use tokio::sync::watch;

/// Authoritative local view of the journal.
pub struct JournalStore {
    repository: Arc<dyn JournalRepository>,
    entries: watch::Sender<Vec<JournalEntry>>,
}

impl JournalStore {
    pub fn new(repository: Arc<dyn JournalRepository>) -> Self {
        let (entries, _) = watch::channel(Vec::new());
        Self {
            repository,
            entries,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<JournalEntry>> {
        self.entries.subscribe()
    }

    /// Current snapshot, most recent first.
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.borrow().clone()
    }

    pub fn find(&self, entry_id: &str) -> Result<JournalEntry> {
        self.entries
            .borrow()
            .iter()
            .find(|entry| entry.id == entry_id)
            .cloned()
            .ok_or_else(|| SolaceError::not_found("JournalEntry", entry_id))
    }

    /// Replaces the cache with the server's listing.
    pub async fn list_entries(&self) -> Result<Vec<JournalEntry>> {
        let mut entries = self.repository.list_all().await?;
        sort_by_recency(&mut entries);
        tracing::debug!("[JournalStore] Refreshed {} entries", entries.len());

        self.entries.send_replace(entries.clone());
        Ok(entries)
    }

    /// Stores a new entry, then refreshes.
    ///
    /// Blank content is rejected before any network call.
    pub async fn create_entry(&self, content: &str) -> Result<Synced<JournalEntry>> {
        require_content(content)?;

        let entry = self.repository.create(content).await?;
        tracing::info!("[JournalStore] Created entry {}", entry.id);

        self.entries.send_modify(|entries| {
            entries.retain(|existing| existing.id != entry.id);
            entries.push(entry.clone());
            sort_by_recency(entries);
        });

        let refresh = self.refresh_after_mutation().await;
        Ok(Synced::new(entry, refresh))
    }

    /// Saves new content for an existing entry, then refreshes.
    ///
    /// `emotion_analysis` is whatever analysis is currently displayed, so an
    /// edit does not drop an earlier analysis.
    pub async fn update_entry(
        &self,
        entry_id: &str,
        content: &str,
        emotion_analysis: Option<String>,
    ) -> Result<Synced<JournalEntry>> {
        require_content(content)?;

        let update = JournalUpdate {
            content: content.to_string(),
            emotion_analysis,
        };
        let entry = self.repository.update(entry_id, &update).await?;
        tracing::info!("[JournalStore] Updated entry {}", entry_id);

        self.entries.send_modify(|entries| {
            if let Some(existing) = entries.iter_mut().find(|e| e.id == entry_id) {
                *existing = entry.clone();
            }
        });

        let refresh = self.refresh_after_mutation().await;
        Ok(Synced::new(entry, refresh))
    }

    /// Deletes an entry, then refreshes.
    pub async fn delete_entry(&self, entry_id: &str) -> Result<Synced<()>> {
        self.repository.delete(entry_id).await?;
        tracing::info!("[JournalStore] Deleted entry {}", entry_id);

        self.entries.send_modify(|entries| {
            entries.retain(|entry| entry.id != entry_id);
        });

        let refresh = self.refresh_after_mutation().await;
        Ok(Synced::new((), refresh))
    }

    /// Runs sentiment analysis. The result is not stored anywhere; saving
    /// the entry is what attaches it.
    pub async fn analyze_entry(&self, content: &str) -> Result<String> {
        require_content(content)?;
        self.repository.analyze(content).await
    }

    /// Empties the cache without talking to the server.
    pub fn clear(&self) {
        self.entries.send_replace(Vec::new());
    }

    async fn refresh_after_mutation(&self) -> Result<()> {
        match self.list_entries().await {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::warn!(
                    "[JournalStore] Refresh after mutation failed, cache is provisional: {}",
                    e
                );
                Err(e)
            }
        }
    }
}
