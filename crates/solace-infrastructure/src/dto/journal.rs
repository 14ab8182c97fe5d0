//! Journal request and response bodies.

use super::{WireId, WireTimestamp, resolve_timestamp};
use serde::{Deserialize, Serialize};
use solace_core::journal::{JournalEntry, sort_by_recency};

/// `GET /journal` response
#[derive(Debug, Deserialize)]
pub struct JournalList {
    #[serde(default)]
    pub journal_entries: Vec<JournalEntryDto>,
}

impl JournalList {
    /// Domain entries, most recent first.
    pub fn into_entries(self) -> Vec<JournalEntry> {
        let mut entries: Vec<JournalEntry> = self
            .journal_entries
            .into_iter()
            .map(JournalEntry::from)
            .collect();
        sort_by_recency(&mut entries);
        entries
    }
}

#[derive(Debug, Deserialize)]
pub struct JournalEntryDto {
    pub id: WireId,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    pub content: String,
    #[serde(default)]
    pub emotion_analysis: Option<String>,
    #[serde(default)]
    pub timestamp: Option<WireTimestamp>,
}

impl From<JournalEntryDto> for JournalEntry {
    fn from(dto: JournalEntryDto) -> Self {
        let id = String::from(dto.id);
        let timestamp = resolve_timestamp(dto.timestamp.as_ref(), "journal entry", &id);
        JournalEntry {
            id,
            date: dto.date,
            time: dto.time,
            content: dto.content,
            // An empty analysis string means "none" on the wire.
            emotion_analysis: dto.emotion_analysis.filter(|text| !text.is_empty()),
            timestamp,
        }
    }
}

/// `POST /journal` and `PUT /journal/{id}` responses: the entry itself, or
/// the entry wrapped under `entry`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EntryEnvelope {
    Wrapped { entry: JournalEntryDto },
    Bare(JournalEntryDto),
}

impl From<EntryEnvelope> for JournalEntry {
    fn from(envelope: EntryEnvelope) -> Self {
        match envelope {
            EntryEnvelope::Wrapped { entry } | EntryEnvelope::Bare(entry) => entry.into(),
        }
    }
}

/// `POST /journal` and `POST /journal/analyze` body
#[derive(Debug, Serialize)]
pub struct ContentRequest<'a> {
    pub content: &'a str,
}

/// `PUT /journal/{id}` body
#[derive(Debug, Serialize)]
pub struct UpdateEntryRequest<'a> {
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion_analysis: Option<&'a str>,
}

/// `POST /journal/analyze` response
#[derive(Debug, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: String,
}
