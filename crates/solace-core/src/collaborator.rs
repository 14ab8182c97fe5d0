//! Capabilities supplied by the presentation layer.
//!
//! The application core never renders anything; it talks to the outside
//! world through these traits.

use crate::error::Result;
use async_trait::async_trait;

/// User-visible notifications (toasts, status lines).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Yes/no decision for destructive operations.
#[async_trait]
pub trait Confirmation: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Speech-to-text capture.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Listens once and returns the transcript.
    async fn transcribe(&self) -> Result<String>;
}

/// Notifier that drops every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _message: &str) {}
}

/// Confirmation that always answers the same way.
#[derive(Debug, Clone, Copy)]
pub struct FixedConfirmation(pub bool);

#[async_trait]
impl Confirmation for FixedConfirmation {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_confirmation() {
        assert!(FixedConfirmation(true).confirm("Delete?").await);
        assert!(!FixedConfirmation(false).confirm("Delete?").await);
    }
}
