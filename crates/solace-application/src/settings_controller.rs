//! Assistant settings and persona template resolution.

use solace_core::error::{Result, SolaceError};
use solace_core::settings::{Settings, SettingsRepository, SettingsUpdate, TemplateCatalog};
use std::sync::Arc;
use tokio::sync::watch;

/// The settings form as the presentation layer sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsState {
    /// Prompt as currently edited, with the selected template
    pub settings: Settings,
    /// Catalog fetched by the last load
    pub catalog: TemplateCatalog,
    /// Text of the selected template, if one is selected and known
    pub template_preview: Option<String>,
    /// Whether a load has completed
    pub loaded: bool,
}

/// Loads, edits and saves the assistant configuration.
pub struct SettingsController {
    repository: Arc<dyn SettingsRepository>,
    state: watch::Sender<SettingsState>,
}

impl SettingsController {
    pub fn new(repository: Arc<dyn SettingsRepository>) -> Self {
        let (state, _) = watch::channel(SettingsState::default());
        Self { repository, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<SettingsState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SettingsState {
        self.state.borrow().clone()
    }

    /// Fetches the settings and the template catalog.
    ///
    /// A selected template overrides the stored prompt with the catalog
    /// text. The local state only changes when both fetches succeed.
    pub async fn load(&self) -> Result<(Settings, TemplateCatalog)> {
        let mut settings = self.repository.load().await?;
        let catalog = self.repository.templates().await?;

        let mut template_preview = None;
        if let Some(name) = settings.selected_template.as_deref() {
            match catalog.get(name) {
                Some(text) => {
                    settings.system_prompt = text.to_string();
                    template_preview = Some(text.to_string());
                }
                None => {
                    tracing::warn!(
                        "[SettingsController] Selected template '{}' is not in the catalog",
                        name
                    );
                }
            }
        }

        tracing::info!(
            "[SettingsController] Loaded settings ({} templates, user type {})",
            catalog.len(),
            settings.user_type()
        );

        self.state.send_replace(SettingsState {
            settings: settings.clone(),
            catalog: catalog.clone(),
            template_preview,
            loaded: true,
        });
        Ok((settings, catalog))
    }

    /// Selects a template, or clears the selection.
    ///
    /// Selecting always overwrites the prompt with the template text, manual
    /// edits included. Clearing leaves the prompt as it is.
    pub fn select_template(&self, name: Option<&str>) -> Result<SettingsState> {
        let text = match name {
            Some(name) => Some(
                self.state
                    .borrow()
                    .catalog
                    .get(name)
                    .map(str::to_string)
                    .ok_or_else(|| SolaceError::not_found("Template", name))?,
            ),
            None => None,
        };

        self.state.send_modify(|state| {
            state.settings.selected_template = name.map(str::to_string);
            if let Some(text) = &text {
                state.settings.system_prompt = text.clone();
            }
            state.template_preview = text;
        });
        Ok(self.state())
    }

    /// Records a manual edit of the prompt.
    pub fn edit_prompt(&self, prompt: &str) {
        self.state.send_modify(|state| {
            state.settings.system_prompt = prompt.to_string();
        });
    }

    /// Persists the prompt and template selection.
    pub async fn save(&self, prompt: &str, template: Option<String>) -> Result<()> {
        let update = SettingsUpdate::new(prompt, template);
        self.repository.save(&update).await?;
        tracing::info!(
            "[SettingsController] Saved settings (user type {})",
            update.user_type
        );

        self.state.send_modify(|state| {
            state.settings.system_prompt = update.system_prompt.clone();
            state.settings.selected_template = update.disability_type.clone();
            state.template_preview = update
                .disability_type
                .as_deref()
                .and_then(|name| state.catalog.get(name))
                .map(str::to_string);
        });
        Ok(())
    }
}
