//! Selection state owned by the coordinator.

use solace_core::attachment::EncodedAttachment;
use solace_core::chat::{ChatSession, MessagePair};
use solace_core::journal::JournalForm;

/// Everything the presentation layer needs besides the store listings.
///
/// Only [`SessionCoordinator`](crate::SessionCoordinator) writes this; stores
/// never touch it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinatorView {
    /// The chat messages are shown for and sent to
    pub active_chat_id: Option<String>,
    pub active_chat_title: Option<String>,
    /// Messages of the active chat, in conversation order
    pub messages: Vec<MessagePair>,
    /// Unsent chat input
    pub draft: String,
    /// Image to go with the next message
    pub pending_attachment: Option<EncodedAttachment>,
    pub journal_form: JournalForm,
}

impl CoordinatorView {
    pub(crate) fn show_chat(&mut self, session: &ChatSession) {
        self.active_chat_id = Some(session.id.clone());
        self.active_chat_title = Some(session.title.clone());
        self.messages = session.messages.clone();
    }

    pub(crate) fn clear_chat(&mut self) {
        self.active_chat_id = None;
        self.active_chat_title = None;
        self.messages.clear();
    }

    pub fn has_attachment(&self) -> bool {
        self.pending_attachment.is_some()
    }

    pub fn is_active(&self, chat_id: &str) -> bool {
        self.active_chat_id.as_deref() == Some(chat_id)
    }
}
