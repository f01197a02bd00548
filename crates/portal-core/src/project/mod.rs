//! Project domain module.
//!
//! # Module Structure
//!
//! - `model`: the project entity and its status
//! - `draft`: the create/edit form state and its submission payload
//! - `repository`: backend operations on projects

mod draft;
mod model;
mod repository;

pub use draft::{ProjectDraft, ProjectField, ProjectSubmission};
pub use model::{Project, ProjectStatus};
pub use repository::ProjectRepository;
