//! Session status model.

use serde::{Deserialize, Serialize};

use crate::user::CurrentUser;

/// Shown when the status check fails for a reason other than "no session".
pub const AUTH_CHECK_FAILED_MESSAGE: &str = "Authentication failed. Please try again.";

/// Shown when a login fails and the backend gave no detail.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

/// Shown after a logout whose backend call failed.
pub const LOGOUT_ADVISORY_MESSAGE: &str =
    "Logout operation encountered an issue, but you've been logged out locally.";

/// Where the session stands, independent of whether an operation is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No session operation has settled yet.
    Unknown,
    Authenticated,
    Anonymous,
}

/// What a protected view should do with the current status.
#[derive(Debug, Clone, PartialEq)]
pub enum Access {
    Loading,
    Granted(CurrentUser),
    RedirectToLogin,
}

/// The `{user, loading, error}` triple every protected view reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub user: Option<CurrentUser>,
    /// A status check, login or logout is in flight.
    pub loading: bool,
    /// Message of the last failed operation.
    pub error: Option<String>,
    pub phase: SessionPhase,
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::initial()
    }
}

impl SessionStatus {
    /// Status at application start: nothing known, a check about to run.
    pub fn initial() -> Self {
        Self {
            user: None,
            loading: true,
            error: None,
            phase: SessionPhase::Unknown,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn access(&self) -> Access {
        if self.loading {
            return Access::Loading;
        }
        match &self.user {
            Some(user) => Access::Granted(user.clone()),
            None => Access::RedirectToLogin,
        }
    }

    /// Marks an operation as started. The previous operation's error stops
    /// being tracked.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn settle_authenticated(&mut self, user: CurrentUser) {
        self.user = Some(user);
        self.phase = SessionPhase::Authenticated;
        self.loading = false;
    }

    pub fn settle_anonymous(&mut self, error: Option<String>) {
        self.user = None;
        self.phase = SessionPhase::Anonymous;
        self.error = error;
        self.loading = false;
    }

    /// A rejected login leaves the user untouched.
    pub fn settle_login_failure(&mut self, error: String) {
        self.phase = if self.user.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        };
        self.error = Some(error);
        self.loading = false;
    }
}
