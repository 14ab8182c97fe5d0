//! The single operation surface for the presentation layer.
//!
//! `SessionCoordinator` composes the stores, owns the selection state
//! (active chat, journal form, draft, pending attachment) and runs every
//! operation inside its lane. Failures are logged, turned into a
//! notification and returned to the caller; nothing is retried.

use crate::chat_store::ChatStore;
use crate::journal_store::JournalStore;
use crate::lane::{Lane, LaneGate, LoadingIndicator};
use crate::settings_controller::{SettingsController, SettingsState};
use crate::view::CoordinatorView;
use chrono::Local;
use futures::future::join_all;
use solace_core::attachment::{AttachmentEncoder, EncodedAttachment, RawAttachment};
use solace_core::chat::{ChatRepository, ChatSession, DEFAULT_CHAT_TITLE, MessagePair};
use solace_core::collaborator::{Confirmation, Notifier, SpeechRecognizer};
use solace_core::error::{Result, SolaceError};
use solace_core::journal::{JournalEntry, JournalForm, JournalRepository};
use solace_core::memory::{MemoryRepository, MemoryScope};
use solace_core::settings::SettingsRepository;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tokio::sync::watch;

pub const CONFIRM_DELETE_CHAT: &str = "Delete this conversation?";
pub const CONFIRM_DELETE_ENTRY: &str = "Delete this journal entry?";
pub const CONFIRM_WIPE_MEMORY: &str = "Delete ALL memory? This will remove all chat history and journal entries. This action cannot be undone.";

/// The remote repositories the coordinator works against.
#[derive(Clone)]
pub struct RemoteServices {
    pub chats: Arc<dyn ChatRepository>,
    pub journal: Arc<dyn JournalRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub memory: Arc<dyn MemoryRepository>,
}

impl RemoteServices {
    /// All four repositories backed by one client.
    pub fn from_backend<T>(backend: Arc<T>) -> Self
    where
        T: ChatRepository + JournalRepository + SettingsRepository + MemoryRepository + 'static,
    {
        Self {
            chats: backend.clone(),
            journal: backend.clone(),
            settings: backend.clone(),
            memory: backend,
        }
    }
}

/// Facade over the chat, journal and settings flows.
pub struct SessionCoordinator {
    chats: ChatStore,
    journal: JournalStore,
    settings: SettingsController,
    memory: Arc<dyn MemoryRepository>,
    lanes: LaneGate,
    encoder: AttachmentEncoder,
    notifier: Arc<dyn Notifier>,
    confirmation: Arc<dyn Confirmation>,
    view: watch::Sender<CoordinatorView>,
}

impl SessionCoordinator {
    pub fn new(
        services: RemoteServices,
        notifier: Arc<dyn Notifier>,
        confirmation: Arc<dyn Confirmation>,
    ) -> Self {
        let (view, _) = watch::channel(CoordinatorView::default());
        Self {
            chats: ChatStore::new(services.chats),
            journal: JournalStore::new(services.journal),
            settings: SettingsController::new(services.settings),
            memory: services.memory,
            lanes: LaneGate::default(),
            encoder: AttachmentEncoder::new(),
            notifier,
            confirmation,
            view,
        }
    }

    // ============================================================================
    // Observation
    // ============================================================================

    pub fn subscribe(&self) -> watch::Receiver<CoordinatorView> {
        self.view.subscribe()
    }

    pub fn view(&self) -> CoordinatorView {
        self.view.borrow().clone()
    }

    pub fn chat_store(&self) -> &ChatStore {
        &self.chats
    }

    pub fn journal_store(&self) -> &JournalStore {
        &self.journal
    }

    pub fn settings_controller(&self) -> &SettingsController {
        &self.settings
    }

    pub fn loading(&self) -> &LoadingIndicator {
        self.lanes.loading()
    }

    /// Loads chats, journal entries and settings.
    ///
    /// The three loads run in their own lanes and fail independently; every
    /// failure is notified.
    pub async fn initialize(&self) -> Result<()> {
        let (chats, journal, settings) = futures::join!(
            self.refresh_chats(),
            self.refresh_journal(),
            self.load_settings()
        );

        let errors = [chats.err(), journal.err(), settings.err()]
            .into_iter()
            .flatten()
            .collect();
        match SolaceError::from_many(errors) {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    // ============================================================================
    // Chat lane
    // ============================================================================

    pub async fn refresh_chats(&self) -> Result<Vec<ChatSession>> {
        let _guard = self.lanes.acquire(Lane::Chat).await;
        match self.chats.list_chats().await {
            Ok(sessions) => {
                self.sync_active_chat();
                Ok(sessions)
            }
            Err(e) => self.fail("loading chats", e),
        }
    }

    /// Creates an empty chat and makes it active.
    pub async fn new_chat(&self) -> Result<ChatSession> {
        let _guard = self.lanes.acquire(Lane::Chat).await;
        match self.chats.create_chat(DEFAULT_CHAT_TITLE).await {
            Ok(session) => {
                self.view.send_modify(|view| view.show_chat(&session));
                self.notifier.notify("New chat created");
                Ok(session)
            }
            Err(e) => self.fail("creating new chat", e),
        }
    }

    /// Makes a chat from the last listing active and shows its messages.
    pub async fn select_chat(&self, chat_id: &str) -> Result<ChatSession> {
        let _guard = self.lanes.acquire(Lane::Chat).await;
        match self.chats.find(chat_id) {
            Ok(session) => {
                self.view.send_modify(|view| view.show_chat(&session));
                Ok(session)
            }
            Err(e) => self.fail("selecting chat", e),
        }
    }

    pub fn set_draft(&self, text: &str) {
        self.view.send_modify(|view| view.draft = text.to_string());
    }

    /// Validates and encodes an image for the next message.
    ///
    /// Returns `false` when the image was empty and nothing is pending.
    pub fn attach_image(&self, raw: &RawAttachment) -> Result<bool> {
        match self.encoder.encode(&raw.bytes, raw.declared_size) {
            Ok(Some(encoded)) => {
                self.view
                    .send_modify(|view| view.pending_attachment = Some(encoded));
                self.notifier
                    .notify("Image selected - add your message and send");
                Ok(true)
            }
            Ok(None) => {
                self.clear_attachment();
                Ok(false)
            }
            Err(e) => self.fail("attaching image", e),
        }
    }

    pub fn clear_attachment(&self) {
        self.view.send_modify(|view| view.pending_attachment = None);
    }

    /// Replaces the chat draft with a transcript. Never sends.
    pub async fn capture_voice(&self, recognizer: &dyn SpeechRecognizer) -> Result<String> {
        self.notifier.notify("Listening... Speak now.");
        match recognizer.transcribe().await {
            Ok(transcript) => {
                self.set_draft(&transcript);
                self.notifier.notify("Voice captured!");
                Ok(transcript)
            }
            Err(e) => self.fail("capturing voice", e),
        }
    }

    /// Sends `text` with the pending attachment to the active chat.
    ///
    /// Without an active chat, one is created first. The pending attachment
    /// is consumed whatever the outcome; the draft is cleared on success and
    /// kept on failure.
    pub async fn send_message(&self, text: &str) -> Result<MessagePair> {
        let attachment = self.take_attachment();
        if text.trim().is_empty() && attachment.is_none() {
            return self.fail("sending message", SolaceError::EmptyContent);
        }
        self.set_draft(text);

        let _guard = self.lanes.acquire(Lane::Chat).await;

        let chat_id = match self.active_chat_id() {
            Some(chat_id) => chat_id,
            None => match self.chats.create_chat(DEFAULT_CHAT_TITLE).await {
                Ok(session) => {
                    self.view.send_modify(|view| view.show_chat(&session));
                    session.id
                }
                Err(e) => return self.fail("creating new chat", e),
            },
        };

        match self.chats.send_message(&chat_id, text, attachment).await {
            Ok(synced) => {
                self.sync_active_chat();
                self.view.send_modify(|view| {
                    if view.draft == text {
                        view.draft.clear();
                    }
                });
                if let Some(e) = &synced.refresh_error {
                    self.report("loading chats", e);
                }
                Ok(synced.value)
            }
            Err(e) => self.fail("sending message", e),
        }
    }

    /// Deletes a chat after confirmation.
    ///
    /// Returns `false` if the user declined. Only deleting the active chat
    /// clears the message view.
    pub async fn delete_chat(&self, chat_id: &str) -> Result<bool> {
        let _guard = self.lanes.acquire(Lane::Chat).await;
        self.delete_chat_in_lane(chat_id).await
    }

    /// Deletes whichever chat is active once earlier chat operations are done.
    ///
    /// The lane is held while the user answers, so the chat being confirmed
    /// is the one that gets deleted.
    pub async fn delete_active_chat(&self) -> Result<bool> {
        let _guard = self.lanes.acquire(Lane::Chat).await;
        match self.active_chat_id() {
            Some(chat_id) => self.delete_chat_in_lane(&chat_id).await,
            None => self.fail("deleting chat", SolaceError::precondition("No chat selected")),
        }
    }

    async fn delete_chat_in_lane(&self, chat_id: &str) -> Result<bool> {
        if !self.confirmation.confirm(CONFIRM_DELETE_CHAT).await {
            tracing::info!("[SessionCoordinator] Deletion of chat {} declined", chat_id);
            return Ok(false);
        }

        match self.chats.delete_chat(chat_id).await {
            Ok(synced) => {
                self.view.send_modify(|view| {
                    if view.is_active(chat_id) {
                        view.clear_chat();
                    }
                });
                if let Some(e) = &synced.refresh_error {
                    self.report("loading chats", e);
                }
                self.notifier.notify("Chat deleted successfully");
                Ok(true)
            }
            Err(e) => self.fail("deleting chat", e),
        }
    }

    // ============================================================================
    // Journal lane
    // ============================================================================

    pub async fn refresh_journal(&self) -> Result<Vec<JournalEntry>> {
        let _guard = self.lanes.acquire(Lane::Journal).await;
        match self.journal.list_entries().await {
            Ok(entries) => Ok(entries),
            Err(e) => self.fail("loading journal entries", e),
        }
    }

    /// Resets the form to a blank draft titled with the current time.
    pub async fn new_journal_entry(&self) -> JournalForm {
        let _guard = self.lanes.acquire(Lane::Journal).await;
        let form = JournalForm::draft(Local::now());
        self.view
            .send_modify(|view| view.journal_form = form.clone());
        form
    }

    /// Shows an entry from the last listing in the form.
    pub async fn open_journal_entry(&self, entry_id: &str) -> Result<JournalForm> {
        let _guard = self.lanes.acquire(Lane::Journal).await;
        match self.journal.find(entry_id) {
            Ok(entry) => {
                let form = JournalForm::from_entry(&entry);
                self.view
                    .send_modify(|view| view.journal_form = form.clone());
                Ok(form)
            }
            Err(e) => self.fail("opening journal entry", e),
        }
    }

    pub fn set_journal_content(&self, content: &str) {
        self.view
            .send_modify(|view| view.journal_form.content = content.to_string());
    }

    /// Creates or updates the entry the form refers to.
    ///
    /// A new entry is not selected afterwards: the form is cleared so the
    /// entry shows up in the refreshed listing instead. An update keeps the
    /// form on the entry and carries the displayed analysis along.
    pub async fn save_journal(&self, content: &str) -> Result<JournalEntry> {
        let _guard = self.lanes.acquire(Lane::Journal).await;
        let form = self.view.borrow().journal_form.clone();

        let result = match form.entry_id.as_deref() {
            None => self.journal.create_entry(content).await,
            Some(entry_id) => {
                self.journal
                    .update_entry(entry_id, content, form.analysis.clone())
                    .await
            }
        };

        match result {
            Ok(synced) => {
                let entry = synced.value;
                self.view.send_modify(|view| {
                    view.journal_form = if form.is_draft() {
                        JournalForm::default()
                    } else {
                        JournalForm::from_entry(&entry)
                    };
                });
                if let Some(e) = &synced.refresh_error {
                    self.report("loading journal entries", e);
                }
                self.notifier.notify("Journal entry saved successfully");
                Ok(entry)
            }
            Err(e) => {
                self.set_journal_content(content);
                self.fail("saving journal entry", e)
            }
        }
    }

    /// Shows a sentiment analysis in the form without saving it.
    pub async fn analyze_journal(&self, content: &str) -> Result<String> {
        let _guard = self.lanes.acquire(Lane::Journal).await;
        match self.journal.analyze_entry(content).await {
            Ok(analysis) => {
                self.view.send_modify(|view| {
                    view.journal_form.content = content.to_string();
                    view.journal_form.analysis = Some(analysis.clone());
                });
                self.notifier.notify("Analysis complete");
                Ok(analysis)
            }
            Err(e) => self.fail("analyzing journal entry", e),
        }
    }

    /// Deletes the entry shown in the form, after confirmation.
    ///
    /// The form is read once earlier journal operations are done and the
    /// lane stays held through the confirmation.
    pub async fn delete_journal_entry(&self) -> Result<bool> {
        let _guard = self.lanes.acquire(Lane::Journal).await;
        let Some(entry_id) = self.view.borrow().journal_form.entry_id.clone() else {
            return self.fail(
                "deleting journal entry",
                SolaceError::precondition("No journal entry selected"),
            );
        };
        if !self.confirmation.confirm(CONFIRM_DELETE_ENTRY).await {
            tracing::info!(
                "[SessionCoordinator] Deletion of journal entry {} declined",
                entry_id
            );
            return Ok(false);
        }

        match self.journal.delete_entry(&entry_id).await {
            Ok(synced) => {
                self.view.send_modify(|view| {
                    if view.journal_form.entry_id.as_deref() == Some(entry_id.as_str()) {
                        view.journal_form = JournalForm::default();
                    }
                });
                if let Some(e) = &synced.refresh_error {
                    self.report("loading journal entries", e);
                }
                self.notifier.notify("Journal entry deleted successfully");
                Ok(true)
            }
            Err(e) => self.fail("deleting journal entry", e),
        }
    }

    // ============================================================================
    // Settings lane
    // ============================================================================

    pub async fn load_settings(&self) -> Result<SettingsState> {
        let _guard = self.lanes.acquire(Lane::Settings).await;
        match self.settings.load().await {
            Ok(_) => Ok(self.settings.state()),
            Err(e) => self.fail("loading settings", e),
        }
    }

    pub async fn select_template(&self, name: Option<&str>) -> Result<SettingsState> {
        let _guard = self.lanes.acquire(Lane::Settings).await;
        match self.settings.select_template(name) {
            Ok(state) => Ok(state),
            Err(e) => self.fail("selecting template", e),
        }
    }

    pub fn edit_prompt(&self, prompt: &str) {
        self.settings.edit_prompt(prompt);
    }

    pub async fn save_settings(&self, prompt: &str, template: Option<String>) -> Result<()> {
        let _guard = self.lanes.acquire(Lane::Settings).await;
        match self.settings.save(prompt, template).await {
            Ok(()) => {
                self.notifier.notify("Settings saved successfully");
                Ok(())
            }
            Err(e) => self.fail("saving settings", e),
        }
    }

    // ============================================================================
    // Memory
    // ============================================================================

    /// Deletes every chat and journal entry on the server.
    ///
    /// Best effort: both remote deletes are attempted, and the local caches
    /// and selections are cleared even if one of them fails. Any failure is
    /// still reported.
    pub async fn wipe_memory(&self) -> Result<bool> {
        if !self.confirmation.confirm(CONFIRM_WIPE_MEMORY).await {
            tracing::info!("[SessionCoordinator] Memory wipe declined");
            return Ok(false);
        }

        // Fixed order: chat before journal.
        let _chat = self.lanes.acquire(Lane::Chat).await;
        let _journal = self.lanes.acquire(Lane::Journal).await;

        let scopes: Vec<MemoryScope> = MemoryScope::iter().collect();
        let outcomes = join_all(scopes.iter().map(|scope| self.memory.wipe(*scope))).await;

        self.chats.clear();
        self.journal.clear();
        self.view.send_modify(|view| {
            view.clear_chat();
            view.pending_attachment = None;
            view.journal_form = JournalForm::default();
        });

        let errors: Vec<SolaceError> = scopes
            .iter()
            .zip(outcomes)
            .filter_map(|(scope, outcome)| {
                outcome
                    .map_err(|e| {
                        tracing::error!("[SessionCoordinator] Wiping {} failed: {}", scope, e);
                        e
                    })
                    .err()
            })
            .collect();

        match SolaceError::from_many(errors) {
            Some(e) => self.fail("clearing memory", e),
            None => {
                tracing::info!("[SessionCoordinator] Memory wiped");
                self.notifier.notify("All memory cleared successfully");
                Ok(true)
            }
        }
    }

    // ============================================================================
    // Helpers
    // ============================================================================

    fn active_chat_id(&self) -> Option<String> {
        self.view.borrow().active_chat_id.clone()
    }

    fn take_attachment(&self) -> Option<EncodedAttachment> {
        let mut taken = None;
        self.view
            .send_modify(|view| taken = view.pending_attachment.take());
        taken
    }

    /// Re-reads the active chat from the store after a refresh.
    fn sync_active_chat(&self) {
        let Some(chat_id) = self.active_chat_id() else {
            return;
        };
        match self.chats.find(&chat_id) {
            Ok(session) => self.view.send_modify(|view| view.show_chat(&session)),
            Err(_) => {
                tracing::info!(
                    "[SessionCoordinator] Active chat {} is gone from the server, clearing view",
                    chat_id
                );
                self.view.send_modify(CoordinatorView::clear_chat);
            }
        }
    }

    fn report(&self, action: &str, error: &SolaceError) {
        tracing::error!(
            kind = %error.kind(),
            "[SessionCoordinator] Error {}: {}",
            action,
            error
        );
        self.notifier.notify(&format!("Error {}: {}", action, error));
    }

    fn fail<T>(&self, action: &str, error: SolaceError) -> Result<T> {
        self.report(action, &error);
        Err(error)
    }
}
