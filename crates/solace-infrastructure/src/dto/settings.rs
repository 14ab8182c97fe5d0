//! Settings and template catalog bodies.

use serde::{Deserialize, Serialize};
use solace_core::settings::{Settings, SettingsUpdate, TemplateCatalog, UserType};
use std::collections::BTreeMap;

/// `GET /settings` response
#[derive(Debug, Deserialize)]
pub struct SettingsEnvelope {
    pub settings: SettingsDto,
}

#[derive(Debug, Deserialize)]
pub struct SettingsDto {
    #[serde(default)]
    pub system_prompt: String,
    #[serde(default)]
    pub selected_template: Option<String>,
}

impl From<SettingsDto> for Settings {
    fn from(dto: SettingsDto) -> Self {
        Settings {
            system_prompt: dto.system_prompt,
            selected_template: dto.selected_template.filter(|name| !name.is_empty()),
        }
    }
}

/// `PUT /settings` body. `disability_type` is sent as `null` when unset.
#[derive(Debug, Serialize)]
pub struct SettingsUpdateRequest<'a> {
    pub user_type: UserType,
    pub disability_type: Option<&'a str>,
    pub system_prompt: &'a str,
}

impl<'a> From<&'a SettingsUpdate> for SettingsUpdateRequest<'a> {
    fn from(update: &'a SettingsUpdate) -> Self {
        Self {
            user_type: update.user_type,
            disability_type: update.disability_type.as_deref(),
            system_prompt: &update.system_prompt,
        }
    }
}

/// `GET /disability-templates` response
#[derive(Debug, Deserialize)]
pub struct TemplateCatalogResponse {
    #[serde(default)]
    pub templates: BTreeMap<String, String>,
}

impl From<TemplateCatalogResponse> for TemplateCatalog {
    fn from(response: TemplateCatalogResponse) -> Self {
        TemplateCatalog::new(response.templates)
    }
}
