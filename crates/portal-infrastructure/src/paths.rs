//! Platform paths of the portal client.
//!
//! ```text
//! ~/.config/student-portal/        # Config directory
//! └── config.toml                  # Application configuration
//!
//! ~/.local/share/student-portal/   # Data directory
//! └── logs/                        # Application logs
//!     └── portal.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

use portal_core::error::{PortalError, Result};

const APP_DIR_NAME: &str = "student-portal";

/// Resolves where the client keeps its files.
pub struct PortalPaths;

impl PortalPaths {
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| PortalError::config("Cannot find the platform config directory"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| PortalError::config("Cannot find the platform data directory"))
    }

    /// Path to `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Directory the shell writes its rolling log files into.
    pub fn logs_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("logs"))
    }
}
