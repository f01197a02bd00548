use serde::{Deserialize, Serialize};

use crate::certificate::{CertificateCategory, RecognitionPolicy};
use crate::error::Result;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PortalConfig {
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub forms: FormSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl PortalConfig {
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Cookie the anti-forgery token is read from.
    #[serde(default = "default_csrf_cookie_name")]
    pub csrf_cookie_name: String,
    #[serde(default = "default_csrf_header_name")]
    pub csrf_header_name: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            csrf_cookie_name: default_csrf_cookie_name(),
            csrf_header_name: default_csrf_header_name(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSettings {
    #[serde(default)]
    pub recognition_policy: RecognitionPolicy,
    #[serde(default)]
    pub default_certificate_category: CertificateCategory,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `info` or `portal_infrastructure=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_csrf_cookie_name() -> String {
    "csrftoken".to_string()
}

fn default_csrf_header_name() -> String {
    "X-CSRFToken".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
