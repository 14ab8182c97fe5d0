//! Journal domain module.
//!
//! - `model`: Journal entries and the edit form (`JournalEntry`, `JournalForm`)
//! - `repository`: Repository trait for the remote journal resource

mod model;
mod repository;

pub use model::{
    JournalEntry, JournalForm, JournalUpdate, display_date, display_time, require_content,
    sort_by_recency,
};
pub use repository::JournalRepository;
