//! Path management for solace configuration and logs.
//!
//! ```text
//! ~/.config/solace/            # Config directory (platform config dir)
//! └── config.toml              # Client configuration
//!
//! ~/.local/share/solace/       # Data directory
//! └── logs/                    # Application logs
//!     └── solace.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "solace";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform directory could not be determined.
    DirNotFound(&'static str),
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::DirNotFound(kind) => write!(f, "Cannot find {} directory", kind),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for solace.
pub struct SolacePaths;

impl SolacePaths {
    /// Returns the solace configuration directory (e.g. `~/.config/solace/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::DirNotFound("config"))
    }

    /// Returns the solace data directory (e.g. `~/.local/share/solace/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::DirNotFound("data"))
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the directory rolling log files are written to.
    pub fn log_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("logs"))
    }
}
