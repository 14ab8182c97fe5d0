//! Configuration service implementation.
//!
//! Loads [`ClientConfig`] from `config.toml` and applies environment
//! overrides on top.

use crate::paths::SolacePaths;
use solace_core::config::ClientConfig;
use solace_core::error::{Result, SolaceError};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

pub const ENV_API_BASE: &str = "SOLACE_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "SOLACE_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "SOLACE_LOG_LEVEL";

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Uses the default location from [`SolacePaths::config_file`].
    pub fn new() -> Self {
        Self {
            path: SolacePaths::config_file().ok(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Uses an explicit file, e.g. from `--config` or a test.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Gets the configuration, loading it on first access.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the file exists but cannot be read or
    /// parsed, or an override has an invalid value.
    pub fn get_config(&self) -> Result<ClientConfig> {
        if let Ok(guard) = self.config.read()
            && let Some(cached) = guard.as_ref()
        {
            return Ok(cached.clone());
        }

        let mut loaded = self.load_file()?;
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok())?;

        if let Ok(mut guard) = self.config.write() {
            *guard = Some(loaded.clone());
        }
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut guard) = self.config.write() {
            *guard = None;
        }
    }

    fn load_file(&self) -> Result<ClientConfig> {
        let Some(path) = self.path.as_ref() else {
            tracing::debug!("[ConfigService] No config path available, using defaults");
            return Ok(ClientConfig::default());
        };

        if !path.exists() {
            tracing::debug!(
                "[ConfigService] {} not found, using defaults",
                path.display()
            );
            return Ok(ClientConfig::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            SolaceError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: ClientConfig = toml::from_str(&content)?;
        tracing::info!("[ConfigService] Loaded configuration from {}", path.display());
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies `SOLACE_*` overrides read through `lookup`.
pub fn apply_env_overrides<F>(config: &mut ClientConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(api_base) = lookup(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
        config.api_base = api_base;
    }
    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
        config.request_timeout_secs = raw.trim().parse().map_err(|_| {
            SolaceError::config(format!("{} must be a number of seconds, got '{}'", ENV_TIMEOUT_SECS, raw))
        })?;
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
        config.log_level = level;
    }
    Ok(())
}
