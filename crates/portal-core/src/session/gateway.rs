//! Authentication gateway trait.

use async_trait::async_trait;

use super::credentials::Credentials;
use crate::error::Result;
use crate::user::CurrentUser;

/// Backend calls that create, inspect and end a session.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Logs in and returns the user record of the new session.
    ///
    /// A rejection carries the backend's detail message when it sent one.
    async fn login(&self, credentials: &Credentials) -> Result<CurrentUser>;

    /// Ends the backend session.
    async fn logout(&self) -> Result<()>;

    /// Returns the user of the current session.
    ///
    /// `Ok(None)` means the backend answered without a user payload; no
    /// session or a forbidden session is reported as
    /// [`crate::PortalError::Unauthenticated`].
    async fn current_user(&self) -> Result<Option<CurrentUser>>;

    /// Drops every session marker held on the client side (cookies, tokens).
    async fn clear_session_artifacts(&self);
}
