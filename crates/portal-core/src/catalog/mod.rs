//! Reference candidates offered by the backend.
//!
//! Technologies and students are the two kinds of rows a form can point at.
//! Both are reduced to a [`Candidate`] before they reach the reference picker.

mod model;
mod repository;

pub use model::{Candidate, LinkedRow, Student, Technology};
pub use repository::CatalogRepository;
