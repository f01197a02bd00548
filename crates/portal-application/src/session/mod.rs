//! Session management.

mod manager;

pub use manager::SessionManager;
