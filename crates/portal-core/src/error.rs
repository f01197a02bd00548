//! Error types for the student portal client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire portal client.
///
/// Backend failures are classified here once, so that the session and form
/// layers can decide which ones to absorb and which ones to surface.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PortalError {
    /// The backend reported that there is no session (401) or that the
    /// session is not allowed to see the resource (403).
    #[error("Not authenticated (HTTP {status}){}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Unauthenticated { status: u16, detail: Option<String> },

    /// The backend answered with a non-success status.
    #[error("Backend rejected the request (HTTP {status}){}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Rejected { status: u16, detail: Option<String> },

    /// The request never produced a response (connect, timeout, TLS, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Client-side validation of a form draft failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PortalError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an Unauthenticated error
    pub fn unauthenticated(status: u16, detail: Option<String>) -> Self {
        Self::Unauthenticated { status, detail }
    }

    /// Creates a Rejected error
    pub fn rejected(status: u16, detail: Option<String>) -> Self {
        Self::Rejected { status, detail }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is the "no session" / "forbidden" case.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated { .. })
    }

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// HTTP status attached to this error, if the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthenticated { status, .. } | Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for showing to the user verbatim.
    ///
    /// Returns the backend-supplied detail for HTTP failures and the message
    /// of validation errors. Everything else has no user-facing detail and the
    /// caller is expected to fall back to a generic message.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthenticated { detail, .. } | Self::Rejected { detail, .. } => detail.as_deref(),
            Self::Validation(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Returns [`Self::detail`] or the given fallback.
    pub fn detail_or(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PortalError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PortalError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PortalError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, PortalError>`.
pub type Result<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_prefers_backend_message() {
        let err = PortalError::rejected(400, Some("Invalid credentials".to_string()));
        assert_eq!(err.detail(), Some("Invalid credentials"));
        assert_eq!(err.detail_or("Login failed"), "Invalid credentials");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_detail_falls_back() {
        let err = PortalError::transport("connection refused");
        assert_eq!(err.detail(), None);
        assert_eq!(err.detail_or("Login failed"), "Login failed");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_unauthenticated_predicate() {
        assert!(PortalError::unauthenticated(401, None).is_unauthenticated());
        assert!(PortalError::unauthenticated(403, Some("Insufficient permissions".to_string())).is_unauthenticated());
        assert!(!PortalError::rejected(500, None).is_unauthenticated());
    }

    #[test]
    fn test_rejected_display_includes_detail() {
        let err = PortalError::rejected(500, Some("boom".to_string()));
        assert_eq!(err.to_string(), "Backend rejected the request (HTTP 500): boom");
        let err = PortalError::rejected(502, None);
        assert_eq!(err.to_string(), "Backend rejected the request (HTTP 502)");
    }
}
