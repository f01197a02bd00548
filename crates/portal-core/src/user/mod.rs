//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: the identity record returned by the backend for the logged-in user

mod model;

// Re-export public API
pub use model::CurrentUser;
