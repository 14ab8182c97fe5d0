//! Journal domain model.

use crate::error::{Result, SolaceError};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// A stored journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Server-assigned identifier
    pub id: String,
    /// Display-formatted creation date
    pub date: String,
    /// Display-formatted creation time
    pub time: String,
    /// Entry body, never empty once persisted
    pub content: String,
    /// Sentiment analysis attached by an explicit save
    pub emotion_analysis: Option<String>,
    /// Server-assigned ordering key
    pub timestamp: DateTime<Utc>,
}

impl JournalEntry {
    /// Title shown in listings and in the edit form.
    pub fn title(&self) -> String {
        format!("{} {}", self.date, self.time)
    }
}

/// Changes sent when saving an existing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalUpdate {
    pub content: String,
    pub emotion_analysis: Option<String>,
}

/// The journal edit form.
///
/// `entry_id` is `None` for an unsaved draft. `analysis` holds whatever is
/// currently displayed, which may not be persisted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalForm {
    pub entry_id: Option<String>,
    pub title: String,
    pub content: String,
    pub analysis: Option<String>,
}

impl JournalForm {
    /// A blank draft titled with the given creation instant.
    pub fn draft(now: DateTime<Local>) -> Self {
        Self {
            entry_id: None,
            title: format!("{} {}", display_date(&now), display_time(&now)),
            content: String::new(),
            analysis: None,
        }
    }

    /// The form showing a stored entry.
    pub fn from_entry(entry: &JournalEntry) -> Self {
        Self {
            entry_id: Some(entry.id.clone()),
            title: entry.title(),
            content: entry.content.clone(),
            analysis: entry.emotion_analysis.clone(),
        }
    }

    pub fn is_draft(&self) -> bool {
        self.entry_id.is_none()
    }
}

/// "May 1, 2024"
pub fn display_date(at: &DateTime<Local>) -> String {
    at.format("%B %-d, %Y").to_string()
}

/// "3:04 PM"
pub fn display_time(at: &DateTime<Local>) -> String {
    at.format("%-I:%M %p").to_string()
}

/// Rejects empty or whitespace-only content.
pub fn require_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(SolaceError::EmptyContent);
    }
    Ok(())
}

/// Sorts entries most recent first.
pub fn sort_by_recency(entries: &mut [JournalEntry]) {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
