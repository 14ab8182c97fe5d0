//! Domain layer for the Solace client.
//!
//! Models, the error taxonomy, the repository traits the remote service is
//! reached through, and the capabilities the presentation layer provides.
//! Nothing here performs I/O.

pub mod attachment;
pub mod chat;
pub mod collaborator;
pub mod config;
pub mod error;
pub mod journal;
pub mod memory;
pub mod settings;

// Re-export common error type
pub use error::{ErrorKind, Result, SolaceError};
