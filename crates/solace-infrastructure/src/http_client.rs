//! HTTP implementation of the remote repositories.
//!
//! `HttpRemoteClient` speaks the remote service's JSON contract and maps
//! every failure onto the client error taxonomy:
//!
//! - no response (connect error, timeout) → `Transport`
//! - non-success status → `Status { code }`
//! - body that does not decode → `Decode`
//!
//! Nothing is retried here; whether to retry is the caller's decision.

use crate::dto::chat::{
    ConversationList, CreateChatResponse, SendMessageRequest, SendMessageResponse,
};
use crate::dto::journal::{
    AnalysisResponse, ContentRequest, EntryEnvelope, JournalList, UpdateEntryRequest,
};
use crate::dto::settings::{SettingsEnvelope, SettingsUpdateRequest, TemplateCatalogResponse};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use solace_core::chat::{ChatRepository, ChatSession, MessagePair, NewMessage};
use solace_core::config::ClientConfig;
use solace_core::error::{Result, SolaceError};
use solace_core::journal::{JournalEntry, JournalRepository, JournalUpdate};
use solace_core::memory::{MemoryRepository, MemoryScope};
use solace_core::settings::{Settings, SettingsRepository, SettingsUpdate, TemplateCatalog};
use std::time::Duration;
use uuid::Uuid;

/// Status bodies are kept in the error for diagnostics, up to this many chars.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Typed client for the remote service.
#[derive(Clone, Debug)]
pub struct HttpRemoteClient {
    client: Client,
    base_url: String,
}

impl HttpRemoteClient {
    /// Creates a client for `base_url` with the given per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SolaceError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(
            config.api_base.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and returns the body of a successful response.
    async fn dispatch<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<String>
    where
        B: Serialize + ?Sized + Sync,
    {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, %method, path, "[RemoteClient] Sending request");

        let mut request = self.client.request(method.clone(), self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::debug!(%request_id, error = %e, "[RemoteClient] No response");
            SolaceError::transport(format!("{} {}: {}", method, path, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
            tracing::debug!(
                %request_id,
                status = status.as_u16(),
                "[RemoteClient] Request failed"
            );
            return Err(SolaceError::status(status.as_u16(), message));
        }

        let text = response.text().await.map_err(|e| {
            SolaceError::transport(format!("{} {}: failed to read body: {}", method, path, e))
        })?;
        tracing::debug!(%request_id, bytes = text.len(), "[RemoteClient] Request succeeded");
        Ok(text)
    }

    async fn fetch<R>(&self, method: Method, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let text = self.dispatch::<()>(method, path, None).await?;
        decode(path, &text)
    }

    async fn fetch_with<B, R>(&self, method: Method, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let text = self.dispatch(method, path, Some(body)).await?;
        decode(path, &text)
    }

    /// For endpoints that only report success or failure.
    async fn execute(&self, method: Method, path: &str) -> Result<()> {
        self.dispatch::<()>(method, path, None).await.map(|_| ())
    }
}

fn decode<R: DeserializeOwned>(path: &str, text: &str) -> Result<R> {
    serde_json::from_str(text)
        .map_err(|e| SolaceError::decode(format!("Unexpected response from {}: {}", path, e)))
}

#[async_trait]
impl ChatRepository for HttpRemoteClient {
    async fn create(&self, title: &str) -> Result<ChatSession> {
        // Only the id comes back; the next listing carries the server's timestamp.
        let response: CreateChatResponse = self.fetch(Method::POST, "/chats").await?;
        Ok(ChatSession::empty(response.chat_id, title, Utc::now()))
    }

    async fn list_all(&self) -> Result<Vec<ChatSession>> {
        let list: ConversationList = self.fetch(Method::GET, "/chats").await?;
        Ok(list.into_sessions())
    }

    async fn delete(&self, chat_id: &str) -> Result<()> {
        self.execute(Method::DELETE, &format!("/chats/{}", chat_id))
            .await
    }

    async fn send_message(&self, message: &NewMessage) -> Result<MessagePair> {
        let body = SendMessageRequest {
            message: &message.text,
            chat_id: &message.chat_id,
            base64_image: message.attachment.as_ref().map(|a| a.as_str()),
        };
        let path = format!("/chats/{}/message", message.chat_id);
        let response: SendMessageResponse = self.fetch_with(Method::POST, &path, &body).await?;
        Ok(MessagePair::new(message.text.clone(), response.response))
    }
}

#[async_trait]
impl JournalRepository for HttpRemoteClient {
    async fn list_all(&self) -> Result<Vec<JournalEntry>> {
        let list: JournalList = self.fetch(Method::GET, "/journal").await?;
        Ok(list.into_entries())
    }

    async fn create(&self, content: &str) -> Result<JournalEntry> {
        let envelope: EntryEnvelope = self
            .fetch_with(Method::POST, "/journal", &ContentRequest { content })
            .await?;
        Ok(envelope.into())
    }

    async fn update(&self, entry_id: &str, update: &JournalUpdate) -> Result<JournalEntry> {
        let body = UpdateEntryRequest {
            content: &update.content,
            emotion_analysis: update.emotion_analysis.as_deref(),
        };
        let envelope: EntryEnvelope = self
            .fetch_with(Method::PUT, &format!("/journal/{}", entry_id), &body)
            .await?;
        Ok(envelope.into())
    }

    async fn delete(&self, entry_id: &str) -> Result<()> {
        self.execute(Method::DELETE, &format!("/journal/{}", entry_id))
            .await
    }

    async fn analyze(&self, content: &str) -> Result<String> {
        let response: AnalysisResponse = self
            .fetch_with(Method::POST, "/journal/analyze", &ContentRequest { content })
            .await?;
        Ok(response.analysis)
    }
}

#[async_trait]
impl SettingsRepository for HttpRemoteClient {
    async fn load(&self) -> Result<Settings> {
        let envelope: SettingsEnvelope = self.fetch(Method::GET, "/settings").await?;
        Ok(envelope.settings.into())
    }

    async fn save(&self, update: &SettingsUpdate) -> Result<()> {
        let body = SettingsUpdateRequest::from(update);
        self.dispatch(Method::PUT, "/settings", Some(&body))
            .await
            .map(|_| ())
    }

    async fn templates(&self) -> Result<TemplateCatalog> {
        let response: TemplateCatalogResponse =
            self.fetch(Method::GET, "/disability-templates").await?;
        Ok(response.into())
    }
}

#[async_trait]
impl MemoryRepository for HttpRemoteClient {
    // Servers without scope support treat this as a full wipe.
    async fn wipe(&self, scope: MemoryScope) -> Result<()> {
        self.execute(Method::DELETE, &format!("/memory?scope={}", scope))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpRemoteClient::new("http://127.0.0.1:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.url("/chats"), "http://127.0.0.1:8000/chats");
    }

    #[test]
    fn test_decode_failure_is_typed() {
        let err = decode::<SendMessageResponse>("/chats/1/message", "<html>oops</html>").unwrap_err();
        assert!(matches!(err, SolaceError::Decode { .. }));
    }
}
