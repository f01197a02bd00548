use serde::{Deserialize, Serialize};

use super::model::{NewMarker, ReferenceKey};
use super::search::{Matches, search};
use super::selection::{ReferenceSelection, SerializedReferences};
use crate::catalog::Candidate;
use crate::id::EntityId;

/// What the suggestion panel shows for the current query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PanelView {
    Closed,
    Suggestions(Vec<Candidate>),
    /// Nothing matches and ad-hoc creation is allowed; offers `Add "<query>"`.
    AddNew(String),
    NoSuggestions,
}

/// Result of an "accept" keypress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    SelectedExisting(EntityId),
    CreatedNew(NewMarker),
    /// Blank query, or no match with creation disallowed.
    Nothing,
}

/// Interactive state of one reference field: the selection set, the text
/// being typed and whether the suggestion panel is open.
///
/// The candidate list is owned by the caller and passed in where needed, so
/// a picker stays valid when candidates are (re)loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferencePicker {
    selection: ReferenceSelection,
    query: String,
    panel_open: bool,
    /// Whether the user may mint new entries in this field.
    allow_new: bool,
}

impl ReferencePicker {
    pub fn new(selection: ReferenceSelection, allow_new: bool) -> Self {
        Self {
            selection,
            query: String::new(),
            panel_open: false,
            allow_new,
        }
    }

    pub fn selection(&self) -> &ReferenceSelection {
        &self.selection
    }

    pub fn allows_new(&self) -> bool {
        self.allow_new
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// Typing opens the panel.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.panel_open = true;
    }

    pub fn focus(&mut self) {
        self.panel_open = true;
    }

    /// A click outside the input closes the panel and leaves the set as is.
    pub fn click_outside(&mut self) {
        self.panel_open = false;
    }

    fn reset_input(&mut self) {
        self.query.clear();
        self.panel_open = false;
    }

    pub fn suggestions<'a>(&self, candidates: &'a [Candidate]) -> Matches<'a> {
        let selected = self.selection.selected_ids();
        search(candidates, &self.query, &selected)
    }

    pub fn panel(&self, candidates: &[Candidate]) -> PanelView {
        if !self.panel_open {
            return PanelView::Closed;
        }
        let matches = self.suggestions(candidates).to_vec();
        if !matches.is_empty() {
            PanelView::Suggestions(matches)
        } else if self.allow_new && !self.query.trim().is_empty() {
            PanelView::AddNew(self.query.clone())
        } else {
            PanelView::NoSuggestions
        }
    }

    /// Adds an existing row, clears the query and closes the panel.
    /// Returns `false` when the row was already selected.
    pub fn select_existing(&mut self, candidate: &Candidate) -> bool {
        let added = self.selection.push_existing(candidate);
        self.reset_input();
        added
    }

    /// Adds a new reference from typed text. No-op when creation is not
    /// allowed for this field or the text is blank.
    pub fn select_new(&mut self, raw_label: &str) -> Option<NewMarker> {
        if !self.allow_new {
            return None;
        }
        let marker = self.selection.push_new(raw_label)?;
        self.reset_input();
        Some(marker)
    }

    pub fn remove(&mut self, key: &ReferenceKey) -> bool {
        self.selection.remove(key)
    }

    /// Handles an "accept" keypress: the topmost suggestion wins over
    /// creating a new entry.
    pub fn keyboard_confirm(&mut self, candidates: &[Candidate]) -> ConfirmOutcome {
        if self.query.trim().is_empty() {
            return ConfirmOutcome::Nothing;
        }

        if let Some(first) = self.suggestions(candidates).first().cloned() {
            self.select_existing(&first);
            return ConfirmOutcome::SelectedExisting(first.id);
        }

        let query = self.query.clone();
        match self.select_new(&query) {
            Some(marker) => ConfirmOutcome::CreatedNew(marker),
            None => ConfirmOutcome::Nothing,
        }
    }

    pub fn serialize(&self) -> SerializedReferences {
        self.selection.serialize()
    }
}
