//! Assistant settings and persona templates.
//!
//! - `model`: `Settings`, `UserType`, `TemplateCatalog`, `SettingsUpdate`
//! - `repository`: Repository trait for the remote settings resource

mod model;
mod repository;

pub use model::{Settings, SettingsUpdate, TemplateCatalog, UserType};
pub use repository::SettingsRepository;
