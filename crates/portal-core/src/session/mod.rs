//! Authentication session domain.
//!
//! # Module Structure
//!
//! - `model`: the `{user, loading, error}` status, its phase and view gating
//! - `credentials`: login input and the outcome reported to the login view
//! - `gateway`: the backend calls the session depends on

mod credentials;
mod gateway;
mod model;

pub use credentials::{AuthOutcome, Credentials};
pub use gateway::AuthGateway;
pub use model::{
    Access, AUTH_CHECK_FAILED_MESSAGE, LOGIN_FAILED_MESSAGE, LOGOUT_ADVISORY_MESSAGE,
    SessionPhase, SessionStatus,
};
