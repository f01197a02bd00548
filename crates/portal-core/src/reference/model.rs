use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::catalog::Candidate;
use crate::id::EntityId;

/// Client-side marker of a reference that has no backend row yet.
///
/// It identifies the item inside its selection set and is never sent to the
/// backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewMarker(Uuid);

impl NewMarker {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for NewMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "new-{}", self.0)
    }
}

/// One entry of a reference selection set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferenceItem {
    /// Points at a row the backend already has.
    Existing { id: EntityId, label: String },
    /// Asks the backend to create a row with this label.
    New { marker: NewMarker, label: String },
}

/// Identity of an item within a selection set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReferenceKey {
    Existing(EntityId),
    New(NewMarker),
}

impl ReferenceItem {
    pub fn existing(candidate: &Candidate) -> Self {
        Self::Existing {
            id: candidate.id.clone(),
            label: candidate.label.clone(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Existing { label, .. } | Self::New { label, .. } => label,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::New { .. })
    }

    pub fn existing_id(&self) -> Option<&EntityId> {
        match self {
            Self::Existing { id, .. } => Some(id),
            Self::New { .. } => None,
        }
    }

    pub fn key(&self) -> ReferenceKey {
        match self {
            Self::Existing { id, .. } => ReferenceKey::Existing(id.clone()),
            Self::New { marker, .. } => ReferenceKey::New(*marker),
        }
    }
}
