//! Dashboard service.
//!
//! Loads the logged-in student's projects and certificates and groups the
//! certificates into the sections the dashboard shows.

use std::sync::Arc;

use portal_core::certificate::{Certificate, CertificateCategory, CertificateRepository};
use portal_core::id::EntityId;
use portal_core::project::{Project, ProjectRepository};

pub const PROJECTS_LOAD_FAILED_MESSAGE: &str = "Failed to load projects. Please try again.";
pub const CERTIFICATES_LOAD_FAILED_MESSAGE: &str = "Failed to load certificates. Please try again.";
pub const PROJECT_DELETE_FAILED_MESSAGE: &str = "Failed to delete project. Please try again.";
pub const CERTIFICATE_DELETE_FAILED_MESSAGE: &str = "Failed to delete certificate. Please try again.";

/// Everything the dashboard renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub projects: Vec<Project>,
    pub technical: Vec<Certificate>,
    pub foreign_languages: Vec<Certificate>,
    /// Co-curricular and extra-curricular certificates.
    pub other: Vec<Certificate>,
    /// Set when either list failed to load. The other list is still shown.
    pub banner: Option<String>,
}

impl Dashboard {
    fn place_certificates(&mut self, certificates: Vec<Certificate>) {
        for certificate in certificates {
            match certificate.category {
                CertificateCategory::Technical => self.technical.push(certificate),
                CertificateCategory::ForeignLanguage => self.foreign_languages.push(certificate),
                CertificateCategory::CoCurricular | CertificateCategory::ExtraCurricular => {
                    self.other.push(certificate)
                }
            }
        }
    }

    pub fn certificate_count(&self) -> usize {
        self.technical.len() + self.foreign_languages.len() + self.other.len()
    }
}

pub struct DashboardService {
    projects: Arc<dyn ProjectRepository>,
    certificates: Arc<dyn CertificateRepository>,
}

impl DashboardService {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        certificates: Arc<dyn CertificateRepository>,
    ) -> Self {
        Self {
            projects,
            certificates,
        }
    }

    /// Loads both lists concurrently. Never fails; a failed list leaves its
    /// section empty and sets the banner.
    pub async fn load(&self) -> Dashboard {
        let (projects, certificates) = futures::join!(self.projects.list(), self.certificates.list());
        let mut dashboard = Dashboard::default();

        match projects {
            Ok(projects) => dashboard.projects = projects,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load projects");
                dashboard.banner = Some(e.detail_or(PROJECTS_LOAD_FAILED_MESSAGE));
            }
        }
        match certificates {
            Ok(certificates) => dashboard.place_certificates(certificates),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load certificates");
                dashboard
                    .banner
                    .get_or_insert_with(|| e.detail_or(CERTIFICATES_LOAD_FAILED_MESSAGE));
            }
        }

        tracing::debug!(
            projects = dashboard.projects.len(),
            certificates = dashboard.certificate_count(),
            "Dashboard loaded"
        );
        dashboard
    }

    /// Deletes a project; the error is the banner text to show.
    pub async fn delete_project(&self, id: &EntityId) -> Result<(), String> {
        self.projects.delete(id).await.map_err(|e| {
            tracing::error!(project_id = %id, error = %e, "Failed to delete project");
            e.detail_or(PROJECT_DELETE_FAILED_MESSAGE)
        })
    }

    /// Deletes a certificate; the error is the banner text to show.
    pub async fn delete_certificate(&self, id: &EntityId) -> Result<(), String> {
        self.certificates.delete(id).await.map_err(|e| {
            tracing::error!(certificate_id = %id, error = %e, "Failed to delete certificate");
            e.detail_or(CERTIFICATE_DELETE_FAILED_MESSAGE)
        })
    }
}
