//! Form controllers.
//!
//! A controller owns one form instance: its draft, the candidate lists its
//! reference fields search, the submit flag and the dismissible banner.
//!
//! - `project`: create/edit project form
//! - `certificate`: create certificate form

mod certificate;
mod project;

pub use certificate::{CERTIFICATE_CREATE_FAILED_MESSAGE, CertificateFormController};
pub use project::{
    PROJECT_CREATE_FAILED_MESSAGE, PROJECT_UPDATE_FAILED_MESSAGE, ProjectFormController,
    ProjectReferenceField,
};

use std::sync::atomic::{AtomicBool, Ordering};

use portal_core::catalog::{CatalogRepository, Candidate};

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend accepted the submission.
    Submitted,
    /// Another submit of the same form is still outstanding; nothing was sent.
    AlreadySubmitting,
    /// The draft failed validation; nothing was sent.
    Invalid(String),
    /// The backend call failed. The draft is kept for a retry.
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted)
    }

    /// Banner text for failed outcomes.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Invalid(message) | Self::Failed(message) => Some(message),
            Self::Submitted | Self::AlreadySubmitting => None,
        }
    }
}

/// Holds a form's submit flag for the duration of one submit.
pub(crate) struct SubmitGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SubmitGuard<'a> {
    /// Raises the flag, or returns `None` when it is already raised.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self { flag })
        }
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Loads the technology candidates. A failure is logged and yields an empty
/// list so the form stays usable.
pub(crate) async fn load_technologies(catalog: &dyn CatalogRepository) -> Vec<Candidate> {
    match catalog.technologies().await {
        Ok(technologies) => technologies.into_iter().map(Candidate::from).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load technologies, continuing without suggestions");
            Vec::new()
        }
    }
}

/// Loads the student candidates, with the same failure handling as
/// [`load_technologies`].
pub(crate) async fn load_students(catalog: &dyn CatalogRepository) -> Vec<Candidate> {
    match catalog.students().await {
        Ok(students) => students.into_iter().map(Candidate::from).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load students, continuing without suggestions");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_guard_is_exclusive() {
        let flag = AtomicBool::new(false);

        let guard = SubmitGuard::acquire(&flag).unwrap();
        assert!(SubmitGuard::acquire(&flag).is_none());
        drop(guard);

        assert!(SubmitGuard::acquire(&flag).is_some());
        assert!(!flag.load(Ordering::Acquire));
    }

    #[test]
    fn test_outcome_message() {
        assert_eq!(SubmitOutcome::Failed("boom".to_string()).message(), Some("boom"));
        assert_eq!(SubmitOutcome::AlreadySubmitting.message(), None);
        assert!(SubmitOutcome::Submitted.is_submitted());
    }
}
