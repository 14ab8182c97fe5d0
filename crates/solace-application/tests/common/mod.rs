//! In-memory stand-ins for the remote service and the presentation layer.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use solace_application::{RemoteServices, SessionCoordinator};
use solace_core::chat::{ChatRepository, ChatSession, MessagePair, NewMessage};
use solace_core::collaborator::{Confirmation, Notifier, SpeechRecognizer};
use solace_core::error::{Result, SolaceError};
use solace_core::journal::{JournalEntry, JournalRepository, JournalUpdate};
use solace_core::memory::{MemoryRepository, MemoryScope};
use solace_core::settings::{Settings, SettingsRepository, SettingsUpdate, TemplateCatalog};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RemoteState {
    chats: Vec<ChatSession>,
    entries: Vec<JournalEntry>,
    settings: Settings,
    templates: BTreeMap<String, String>,
    clock: i64,
    next_id: u64,
    created_at: Option<DateTime<Utc>>,
    calls: HashMap<&'static str, usize>,
    failing: HashSet<&'static str>,
    in_flight: HashMap<&'static str, usize>,
    max_in_flight: HashMap<&'static str, usize>,
    sent: Vec<NewMessage>,
    updates: Vec<(String, JournalUpdate)>,
    saved_settings: Vec<SettingsUpdate>,
}

impl RemoteState {
    fn tick(&mut self) -> DateTime<Utc> {
        self.clock += 60;
        DateTime::from_timestamp(1_714_550_400 + self.clock, 0).unwrap()
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

/// Remote service kept in memory.
///
/// Listings come back oldest first so ordering is always the client's job.
/// Every call yields to the runtime while "in flight", which lets tests
/// observe overlapping calls. Endpoints named in `fail_on` answer with a
/// 500 status failure.
pub struct MockRemote {
    state: Mutex<RemoteState>,
    reply: String,
    analysis: String,
}

impl MockRemote {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RemoteState::default()),
            reply: "hi".to_string(),
            analysis: "positive".to_string(),
        }
    }

    pub fn fail_on(&self, endpoint: &'static str) {
        self.state.lock().unwrap().failing.insert(endpoint);
    }

    pub fn recover(&self, endpoint: &'static str) {
        self.state.lock().unwrap().failing.remove(endpoint);
    }

    pub fn calls(&self, endpoint: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .get(endpoint)
            .copied()
            .unwrap_or(0)
    }

    /// Highest number of simultaneous calls seen for a group
    /// ("chat", "journal", "settings" or "all").
    pub fn max_in_flight(&self, group: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .max_in_flight
            .get(group)
            .copied()
            .unwrap_or(0)
    }

    pub fn sent(&self) -> Vec<NewMessage> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn updates(&self) -> Vec<(String, JournalUpdate)> {
        self.state.lock().unwrap().updates.clone()
    }

    pub fn saved_settings(&self) -> Vec<SettingsUpdate> {
        self.state.lock().unwrap().saved_settings.clone()
    }

    pub fn chat_count(&self) -> usize {
        self.state.lock().unwrap().chats.len()
    }

    pub fn entry_count(&self) -> usize {
        self.state.lock().unwrap().entries.len()
    }

    pub fn seed_chat(&self, title: &str, messages: &[(&str, &str)]) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id("chat");
        let timestamp = state.tick();
        let mut session = ChatSession::empty(id.clone(), title, timestamp);
        session.messages = messages
            .iter()
            .map(|(user, assistant)| MessagePair::new(*user, *assistant))
            .collect();
        state.chats.push(session);
        id
    }

    /// Timestamp the server assigns to chats created from now on.
    pub fn stamp_created_chats(&self, timestamp: DateTime<Utc>) {
        self.state.lock().unwrap().created_at = Some(timestamp);
    }

    pub fn seed_entry(&self, content: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let entry = new_entry(&mut state, content);
        let id = entry.id.clone();
        state.entries.push(entry);
        id
    }

    pub fn set_settings(&self, prompt: &str, template: Option<&str>) {
        self.state.lock().unwrap().settings = Settings {
            system_prompt: prompt.to_string(),
            selected_template: template.map(str::to_string),
        };
    }

    pub fn add_template(&self, name: &str, text: &str) {
        self.state
            .lock()
            .unwrap()
            .templates
            .insert(name.to_string(), text.to_string());
    }

    async fn enter(&self, endpoint: &'static str, group: &'static str) -> Result<()> {
        {
            let mut state = self.state.lock().unwrap();
            *state.calls.entry(endpoint).or_default() += 1;
            for key in [group, "all"] {
                let now = {
                    let current = state.in_flight.entry(key).or_default();
                    *current += 1;
                    *current
                };
                let max = state.max_in_flight.entry(key).or_default();
                *max = (*max).max(now);
            }
        }

        tokio::task::yield_now().await;
        tokio::task::yield_now().await;

        let mut state = self.state.lock().unwrap();
        for key in [group, "all"] {
            if let Some(current) = state.in_flight.get_mut(key) {
                *current -= 1;
            }
        }
        if state.failing.contains(endpoint) {
            return Err(SolaceError::status(500, format!("{} failed", endpoint)));
        }
        Ok(())
    }
}

impl Default for MockRemote {
    fn default() -> Self {
        Self::new()
    }
}

fn new_entry(state: &mut RemoteState, content: &str) -> JournalEntry {
    let id = state.next_id("entry");
    JournalEntry {
        id,
        date: "May 1, 2024".to_string(),
        time: "9:00 AM".to_string(),
        content: content.to_string(),
        emotion_analysis: None,
        timestamp: state.tick(),
    }
}

#[async_trait]
impl ChatRepository for MockRemote {
    async fn create(&self, title: &str) -> Result<ChatSession> {
        self.enter("create_chat", "chat").await?;
        let mut state = self.state.lock().unwrap();
        let id = state.next_id("chat");
        let timestamp = match state.created_at {
            Some(timestamp) => timestamp,
            None => state.tick(),
        };
        let session = ChatSession::empty(id, title, timestamp);
        state.chats.push(session.clone());
        Ok(session)
    }

    async fn list_all(&self) -> Result<Vec<ChatSession>> {
        self.enter("list_chats", "chat").await?;
        Ok(self.state.lock().unwrap().chats.clone())
    }

    async fn delete(&self, chat_id: &str) -> Result<()> {
        self.enter("delete_chat", "chat").await?;
        let mut state = self.state.lock().unwrap();
        let before = state.chats.len();
        state.chats.retain(|chat| chat.id != chat_id);
        if state.chats.len() == before {
            return Err(SolaceError::status(404, "Chat not found"));
        }
        Ok(())
    }

    async fn send_message(&self, message: &NewMessage) -> Result<MessagePair> {
        self.enter("send_message", "chat").await?;
        let mut state = self.state.lock().unwrap();
        let timestamp = state.tick();
        let pair = MessagePair::new(message.text.clone(), self.reply.clone());
        let Some(chat) = state.chats.iter_mut().find(|chat| chat.id == message.chat_id) else {
            return Err(SolaceError::status(404, "Chat not found"));
        };
        chat.messages.push(pair.clone());
        chat.timestamp = timestamp;
        state.sent.push(message.clone());
        Ok(pair)
    }
}

#[async_trait]
impl JournalRepository for MockRemote {
    async fn list_all(&self) -> Result<Vec<JournalEntry>> {
        self.enter("list_entries", "journal").await?;
        Ok(self.state.lock().unwrap().entries.clone())
    }

    async fn create(&self, content: &str) -> Result<JournalEntry> {
        self.enter("create_entry", "journal").await?;
        let mut state = self.state.lock().unwrap();
        let entry = new_entry(&mut state, content);
        state.entries.push(entry.clone());
        Ok(entry)
    }

    async fn update(&self, entry_id: &str, update: &JournalUpdate) -> Result<JournalEntry> {
        self.enter("update_entry", "journal").await?;
        let mut state = self.state.lock().unwrap();
        state.updates.push((entry_id.to_string(), update.clone()));
        let Some(entry) = state.entries.iter_mut().find(|entry| entry.id == entry_id) else {
            return Err(SolaceError::status(404, "Entry not found"));
        };
        entry.content = update.content.clone();
        entry.emotion_analysis = update.emotion_analysis.clone();
        Ok(entry.clone())
    }

    async fn delete(&self, entry_id: &str) -> Result<()> {
        self.enter("delete_entry", "journal").await?;
        self.state
            .lock()
            .unwrap()
            .entries
            .retain(|entry| entry.id != entry_id);
        Ok(())
    }

    async fn analyze(&self, _content: &str) -> Result<String> {
        self.enter("analyze", "journal").await?;
        Ok(self.analysis.clone())
    }
}

#[async_trait]
impl SettingsRepository for MockRemote {
    async fn load(&self) -> Result<Settings> {
        self.enter("load_settings", "settings").await?;
        Ok(self.state.lock().unwrap().settings.clone())
    }

    async fn save(&self, update: &SettingsUpdate) -> Result<()> {
        self.enter("save_settings", "settings").await?;
        let mut state = self.state.lock().unwrap();
        state.settings = Settings {
            system_prompt: update.system_prompt.clone(),
            selected_template: update.disability_type.clone(),
        };
        state.saved_settings.push(update.clone());
        Ok(())
    }

    async fn templates(&self) -> Result<TemplateCatalog> {
        self.enter("templates", "settings").await?;
        Ok(TemplateCatalog::new(
            self.state.lock().unwrap().templates.clone(),
        ))
    }
}

#[async_trait]
impl MemoryRepository for MockRemote {
    async fn wipe(&self, scope: MemoryScope) -> Result<()> {
        match scope {
            MemoryScope::Chats => {
                self.enter("wipe_chats", "chat").await?;
                self.state.lock().unwrap().chats.clear();
            }
            MemoryScope::Journal => {
                self.enter("wipe_journal", "journal").await?;
                self.state.lock().unwrap().entries.clear();
            }
        }
        Ok(())
    }
}

/// Keeps every notification in order.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn saw(&self, prefix: &str) -> bool {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .any(|message| message.starts_with(prefix))
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Answers every prompt the same way and remembers the prompts.
pub struct ScriptedConfirmation {
    answer: Mutex<bool>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmation {
    pub fn new(answer: bool) -> Self {
        Self {
            answer: Mutex::new(answer),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn answer(&self, answer: bool) {
        *self.answer.lock().unwrap() = answer;
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirmation for ScriptedConfirmation {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        *self.answer.lock().unwrap()
    }
}

pub struct ScriptedRecognizer(pub Result<String>);

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn transcribe(&self) -> Result<String> {
        self.0.clone()
    }
}

pub struct Harness {
    pub remote: Arc<MockRemote>,
    pub notifier: Arc<RecordingNotifier>,
    pub confirmation: Arc<ScriptedConfirmation>,
    pub coordinator: SessionCoordinator,
}

/// A coordinator over a fresh mock remote that confirms everything.
pub fn harness() -> Harness {
    harness_with(MockRemote::new())
}

pub fn harness_with(remote: MockRemote) -> Harness {
    let remote = Arc::new(remote);
    let notifier = Arc::new(RecordingNotifier::default());
    let confirmation = Arc::new(ScriptedConfirmation::new(true));
    let coordinator = SessionCoordinator::new(
        RemoteServices::from_backend(remote.clone()),
        notifier.clone(),
        confirmation.clone(),
    );
    Harness {
        remote,
        notifier,
        confirmation,
        coordinator,
    }
}
