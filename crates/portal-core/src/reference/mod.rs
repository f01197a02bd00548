//! Reference reconciliation.
//!
//! A reference field lets the user attach rows to the entity being edited,
//! either by picking a pre-existing backend row or by typing a label that the
//! backend should create in the same request. This module keeps the two cases
//! apart from the first keystroke to the submitted form.
//!
//! # Module Structure
//!
//! - `model`: [`ReferenceItem`], the tagged existing/new variant
//! - `search`: case-insensitive candidate filtering
//! - `selection`: the ordered selection set and its two-channel serialization
//! - `picker`: the interactive state around one selection (query, panel, confirm)

mod model;
mod picker;
mod search;
mod selection;

pub use model::{NewMarker, ReferenceItem, ReferenceKey};
pub use picker::{ConfirmOutcome, PanelView, ReferencePicker};
pub use search::{Matches, search};
pub use selection::{ReferenceSelection, SerializedReferences};
