//! Identity record of the logged-in user.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::Candidate;
use crate::id::EntityId;

/// The record the backend returns for "who am I" and for a successful login.
///
/// Only the fields the client relies on are typed. Everything else the
/// backend sends is kept in `extra` so that views can show it without the
/// client having to know about it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentUser {
    pub id: EntityId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_no: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CurrentUser {
    /// Returns "first last", falling back to the username when both names
    /// are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    /// The user as a contributor candidate, used to seed contributor sets.
    pub fn as_candidate(&self) -> Candidate {
        Candidate::new(self.id.clone(), self.display_name())
    }
}
