//! Chat domain module.
//!
//! # Module Structure
//!
//! - `model`: Chat session and message pair models (`ChatSession`, `MessagePair`)
//! - `repository`: Repository trait for the remote chat resource
//!
//! # Usage
//!
//! ```ignore
//! use solace_core::chat::{ChatSession, MessagePair, ChatRepository};
//! ```

mod model;
mod repository;

// Re-export public API
pub use model::{ChatSession, MessagePair, NewMessage, DEFAULT_CHAT_TITLE, sort_by_recency};
pub use repository::ChatRepository;
