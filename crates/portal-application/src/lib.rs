//! Application layer of the student portal client.
//!
//! Services here coordinate the domain model with the backend traits. Every
//! backend dependency is injected as an `Arc<dyn Trait>`.

pub mod dashboard;
pub mod forms;
pub mod session;

pub use dashboard::{Dashboard, DashboardService};
pub use forms::{CertificateFormController, ProjectFormController, SubmitOutcome};
pub use session::SessionManager;
