//! Settings domain model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};

/// Kind of user the assistant is configured for.
///
/// Derived, never edited directly: a selected persona template means
/// `SpeciallyAbled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum UserType {
    #[strum(serialize = "Regular")]
    #[serde(rename = "Regular")]
    Regular,
    #[strum(serialize = "Specially Abled")]
    #[serde(rename = "Specially Abled")]
    SpeciallyAbled,
}

impl UserType {
    pub fn for_template(template: Option<&str>) -> Self {
        if template.is_some() {
            UserType::SpeciallyAbled
        } else {
            UserType::Regular
        }
    }
}

/// Assistant configuration as stored by the remote service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub system_prompt: String,
    pub selected_template: Option<String>,
}

impl Settings {
    pub fn user_type(&self) -> UserType {
        UserType::for_template(self.selected_template.as_deref())
    }
}

/// Persona templates by name. Read-only on the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateCatalog {
    templates: BTreeMap<String, String>,
}

impl TemplateCatalog {
    pub fn new(templates: BTreeMap<String, String>) -> Self {
        Self { templates }
    }

    /// Prompt text for a template name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl FromIterator<(String, String)> for TemplateCatalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Payload persisted by a settings save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub user_type: UserType,
    pub disability_type: Option<String>,
    pub system_prompt: String,
}

impl SettingsUpdate {
    /// Builds the update from the edited prompt and the selected template.
    pub fn new(system_prompt: impl Into<String>, template: Option<String>) -> Self {
        Self {
            user_type: UserType::for_template(template.as_deref()),
            disability_type: template,
            system_prompt: system_prompt.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_user_type_derived_from_template() {
        let mut settings = Settings::default();
        assert_eq!(settings.user_type(), UserType::Regular);

        settings.selected_template = Some("Dyslexia".to_string());
        assert_eq!(settings.user_type(), UserType::SpeciallyAbled);
    }

    #[test]
    fn test_user_type_wire_names() {
        assert_eq!(UserType::SpeciallyAbled.to_string(), "Specially Abled");
        assert_eq!(UserType::from_str("Regular").unwrap(), UserType::Regular);
        assert_eq!(
            serde_json::to_string(&UserType::SpeciallyAbled).unwrap(),
            "\"Specially Abled\""
        );
    }

    #[test]
    fn test_settings_update_without_template() {
        let update = SettingsUpdate::new("Be kind", None);
        assert_eq!(update.user_type, UserType::Regular);
        assert!(update.disability_type.is_none());
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog: TemplateCatalog = [
            ("ADHD".to_string(), "Keep answers short.".to_string()),
            ("Low vision".to_string(), "Describe visuals.".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(catalog.get("ADHD"), Some("Keep answers short."));
        assert!(catalog.get("Unknown").is_none());
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["ADHD", "Low vision"]);
    }
}
