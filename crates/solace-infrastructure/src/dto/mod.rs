//! Wire-format types for the remote service.
//!
//! These mirror the JSON bodies exactly and convert into the domain models
//! in `solace_core`. Nothing outside this crate sees them.

pub mod chat;
pub mod journal;
pub mod settings;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifiers arrive as strings or integers depending on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Text(String),
    Number(i64),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(text) => text,
            WireId::Number(number) => number.to_string(),
        }
    }
}

/// Ordering keys arrive as ISO-8601 text (with or without offset) or as
/// epoch seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireTimestamp {
    Seconds(f64),
    Text(String),
}

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

impl WireTimestamp {
    /// Parses the timestamp, treating offset-less values as UTC.
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        match self {
            WireTimestamp::Seconds(secs) => {
                let whole = secs.trunc() as i64;
                let nanos = (secs.fract() * 1_000_000_000.0).round() as u32;
                DateTime::from_timestamp(whole, nanos.min(999_999_999))
            }
            WireTimestamp::Text(text) => {
                if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                    return Some(parsed.with_timezone(&Utc));
                }
                NAIVE_FORMATS
                    .iter()
                    .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                    .map(|naive| naive.and_utc())
            }
        }
    }
}

/// Resolves an optional wire timestamp.
///
/// Missing or unparseable values sort last rather than failing the whole
/// listing.
pub fn resolve_timestamp(raw: Option<&WireTimestamp>, entity: &str, id: &str) -> DateTime<Utc> {
    match raw.and_then(WireTimestamp::parse) {
        Some(timestamp) => timestamp,
        None => {
            tracing::warn!(
                "[RemoteClient] {} '{}' has missing or unreadable timestamp {:?}; sorting it last",
                entity,
                id,
                raw
            );
            DateTime::<Utc>::MIN_UTC
        }
    }
}
