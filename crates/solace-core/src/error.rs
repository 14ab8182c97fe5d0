//! Error types for the Solace client.

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

/// Coarse classification of a [`SolaceError`].
///
/// The presentation layer only needs to know which family a failure belongs
/// to; the variant itself carries the detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Rejected locally before any network call
    ValidationFailure,
    /// No response was received from the remote service
    TransportFailure,
    /// The remote service answered with a non-success status
    StatusFailure,
    /// The response body could not be decoded
    DecodeFailure,
    /// The operation referenced a stale or unknown id
    NotFound,
    /// The operation's precondition does not hold
    PreconditionFailure,
    /// Anything else (configuration, local I/O, aggregated failures)
    Other,
}

/// A shared error type for the entire Solace client.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum SolaceError {
    /// Content was empty or whitespace-only
    #[error("Content cannot be empty")]
    EmptyContent,

    /// Attachment larger than the allowed limit
    #[error("Attachment too large: {size} bytes (limit {limit} bytes)")]
    SizeExceeded { size: u64, limit: u64 },

    /// Attachment is not an image
    #[error("Unsupported attachment: {0}")]
    UnsupportedAttachment(String),

    /// No response received from the remote service
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Response received with a non-success status
    #[error("Server responded with status: {code}")]
    Status { code: u16, message: String },

    /// Response body malformed
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Operation precondition not met (e.g. nothing selected)
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error outside the remote contract
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Multiple errors
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<SolaceError>),
}

impl SolaceError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Precondition error
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a Status error
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::Status {
            code,
            message: message.into(),
        }
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Collapses a list of errors: `None` for none, the error itself for one,
    /// `Multiple` otherwise.
    pub fn from_many(mut errors: Vec<SolaceError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Multiple(errors)),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Maps this error onto the failure taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyContent | Self::SizeExceeded { .. } | Self::UnsupportedAttachment(_) => {
                ErrorKind::ValidationFailure
            }
            Self::Transport { .. } => ErrorKind::TransportFailure,
            Self::Status { .. } => ErrorKind::StatusFailure,
            Self::Decode { .. } => ErrorKind::DecodeFailure,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Precondition(_) => ErrorKind::PreconditionFailure,
            Self::Config(_)
            | Self::Io { .. }
            | Self::Serialization { .. }
            | Self::Internal(_)
            | Self::Multiple(_) => ErrorKind::Other,
        }
    }

    /// Check if this error was caught before reaching the remote service
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::ValidationFailure
    }

    /// Check if this error came out of a remote call
    pub fn is_remote(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::TransportFailure | ErrorKind::StatusFailure | ErrorKind::DecodeFailure
        )
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SolaceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SolaceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SolaceError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<anyhow::Error> for SolaceError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, SolaceError>`.
pub type Result<T> = std::result::Result<T, SolaceError>;
