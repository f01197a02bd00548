//! Configuration service implementation.
//!
//! Loads `PortalConfig` from `config.toml` (by default
//! `~/.config/student-portal/config.toml`), writing the defaults out when the
//! file does not exist yet, then applies environment overrides.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use portal_core::config::PortalConfig;
use portal_core::error::{PortalError, Result};

use crate::paths::PortalPaths;

/// Overrides `backend.base_url`.
pub const BASE_URL_ENV: &str = "PORTAL_BASE_URL";
/// Overrides `logging.level`.
pub const LOG_LEVEL_ENV: &str = "PORTAL_LOG_LEVEL";

/// Loads and caches the portal configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration, filled on first successful load.
    config: Arc<RwLock<Option<PortalConfig>>>,
}

impl ConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// A service reading the platform default `config.toml`.
    pub fn new_default() -> Result<Self> {
        Ok(Self::new(PortalPaths::config_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the configuration, loading it from disk if not cached.
    pub fn get_config(&self) -> Result<PortalConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|_| PortalError::internal("config cache lock poisoned"))?;
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let mut loaded = Self::load_or_create(&self.path)?;
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok());

        let mut write_lock = self
            .config
            .write()
            .map_err(|_| PortalError::internal("config cache lock poisoned"))?;
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    fn load_or_create(path: &Path) -> Result<PortalConfig> {
        if path.exists() {
            let source = std::fs::read_to_string(path)?;
            let config = PortalConfig::from_toml(&source).map_err(|e| {
                PortalError::config(format!("Invalid config file {}: {}", path.display(), e))
            })?;
            tracing::debug!(path = %path.display(), "Loaded config");
            return Ok(config);
        }

        let config = PortalConfig::default();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, config.to_toml()?)?;
        tracing::info!(path = %path.display(), "Created default config");
        Ok(config)
    }
}

/// Applies `PORTAL_*` overrides found through `lookup`. Blank values are
/// ignored.
pub fn apply_env_overrides(config: &mut PortalConfig, lookup: impl Fn(&str) -> Option<String>) {
    let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(base_url) = non_blank(BASE_URL_ENV) {
        tracing::debug!(%base_url, "Base URL overridden from environment");
        config.backend.base_url = base_url;
    }
    if let Some(level) = non_blank(LOG_LEVEL_ENV) {
        config.logging.level = level;
    }
}
