//! Domain model of the student portal client.
//!
//! Holds the session status model, the reference reconciler used by every
//! multi-select form field, the project and certificate drafts, and the
//! traits describing the backend. Nothing in this crate performs I/O.

pub mod catalog;
pub mod certificate;
pub mod config;
pub mod error;
pub mod form;
pub mod id;
pub mod project;
pub mod reference;
pub mod session;
pub mod user;

// Re-export common types
pub use error::PortalError;
pub use id::EntityId;
