//! Settings repository trait.

use super::model::{Settings, SettingsUpdate, TemplateCatalog};
use crate::error::Result;
use async_trait::async_trait;

/// Remote settings storage and persona template catalog.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn load(&self) -> Result<Settings>;

    async fn save(&self, update: &SettingsUpdate) -> Result<()>;

    async fn templates(&self) -> Result<TemplateCatalog>;
}
