use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::model::{NewMarker, ReferenceItem, ReferenceKey};
use crate::catalog::Candidate;
use crate::id::EntityId;

/// Ordered set of references attached to a form field.
///
/// An existing row can be selected at most once. New labels are not
/// deduplicated; the backend decides what to do with repeated labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSelection {
    items: Vec<ReferenceItem>,
    /// Existing row that can never be removed from this set.
    protected: Option<EntityId>,
}

/// A selection split into the two submission channels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedReferences {
    /// Ids of pre-existing rows to link.
    pub existing: Vec<EntityId>,
    /// Labels of rows the backend should create and link.
    pub new: Vec<String>,
}

impl SerializedReferences {
    /// Flattens both channels into form fields: one `existing_field` entry per
    /// id and one `new_field` entry per label.
    pub fn form_fields(&self, existing_field: &str, new_field: &str) -> Vec<(String, String)> {
        self.existing
            .iter()
            .map(|id| (existing_field.to_string(), id.to_string()))
            .chain(
                self.new
                    .iter()
                    .map(|label| (new_field.to_string(), label.clone())),
            )
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.existing.is_empty() && self.new.is_empty()
    }
}

impl ReferenceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the set with `candidate` and protects it from removal.
    pub fn with_protected(candidate: &Candidate) -> Self {
        let mut selection = Self::new();
        selection.push_existing(candidate);
        selection.protected = Some(candidate.id.clone());
        selection
    }

    /// Builds a set of existing references, e.g. from a loaded entity.
    /// Repeated ids are dropped.
    pub fn from_candidates<'a>(candidates: impl IntoIterator<Item = &'a Candidate>) -> Self {
        let mut selection = Self::new();
        for candidate in candidates {
            selection.push_existing(candidate);
        }
        selection
    }

    /// Protects an existing row from removal without adding it.
    pub fn protect(&mut self, id: EntityId) {
        self.protected = Some(id);
    }

    pub fn protected_id(&self) -> Option<&EntityId> {
        self.protected.as_ref()
    }

    pub fn items(&self) -> &[ReferenceItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.items.iter().any(|item| item.existing_id() == Some(id))
    }

    /// Ids of the existing references, for excluding them from suggestions.
    pub fn selected_ids(&self) -> HashSet<EntityId> {
        self.items
            .iter()
            .filter_map(|item| item.existing_id().cloned())
            .collect()
    }

    pub fn is_protected(&self, key: &ReferenceKey) -> bool {
        match (key, &self.protected) {
            (ReferenceKey::Existing(id), Some(protected)) => id == protected,
            _ => false,
        }
    }

    /// Appends an existing reference. Returns `false` if the row is already
    /// selected.
    pub fn push_existing(&mut self, candidate: &Candidate) -> bool {
        if self.contains(&candidate.id) {
            return false;
        }
        self.items.push(ReferenceItem::existing(candidate));
        true
    }

    /// Appends a new reference labelled with the trimmed text. Blank text is
    /// ignored.
    pub fn push_new(&mut self, raw_label: &str) -> Option<NewMarker> {
        let label = raw_label.trim();
        if label.is_empty() {
            return None;
        }
        let marker = NewMarker::generate();
        self.items.push(ReferenceItem::New {
            marker,
            label: label.to_string(),
        });
        Some(marker)
    }

    /// Removes the item with the given identity. Protected and absent items
    /// are left alone; returns whether something was removed.
    pub fn remove(&mut self, key: &ReferenceKey) -> bool {
        if self.is_protected(key) {
            return false;
        }
        let before = self.items.len();
        self.items.retain(|item| &item.key() != key);
        self.items.len() != before
    }

    /// Splits the set into the existing-id and new-label channels, keeping
    /// the selection order within each channel.
    pub fn serialize(&self) -> SerializedReferences {
        let mut out = SerializedReferences::default();
        for item in &self.items {
            match item {
                ReferenceItem::Existing { id, .. } => out.existing.push(id.clone()),
                ReferenceItem::New { label, .. } => out.new.push(label.clone()),
            }
        }
        out
    }
}
