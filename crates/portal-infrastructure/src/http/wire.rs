//! Wire shapes of the portal backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use portal_core::error::PortalError;
use portal_core::user::CurrentUser;

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// The login endpoint answers either with the user record itself or with
/// `{token, user, expires_at}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LoginResponse {
    Wrapped { user: CurrentUser },
    Bare(CurrentUser),
}

impl LoginResponse {
    pub fn into_user(self) -> CurrentUser {
        match self {
            Self::Wrapped { user } | Self::Bare(user) => user,
        }
    }
}

/// List endpoints return a plain array or a paginated envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListEnvelope<T> {
    Plain(Vec<T>),
    Paged {
        #[serde(alias = "data")]
        results: Vec<T>,
    },
}

impl<T> ListEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Plain(items) | Self::Paged { results: items } => items,
        }
    }
}

/// Message carried by an error body: `detail`, else `error`. Non-JSON bodies
/// and non-string values yield nothing.
pub(crate) fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["detail", "error"].iter().find_map(|key| {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(str::to_string)
    })
}

/// Classifies a non-success response.
pub(crate) fn status_error(status: u16, body: &str) -> PortalError {
    let detail = error_detail(body);
    match status {
        401 | 403 => PortalError::unauthenticated(status, detail),
        _ => PortalError::rejected(status, detail),
    }
}

/// Value of cookie `name` in a `Cookie` header (`a=1; b=2`).
pub(crate) fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_string())
    })
}
