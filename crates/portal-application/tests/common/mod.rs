//! In-memory backend shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use portal_core::catalog::{CatalogRepository, Student, Technology};
use portal_core::certificate::{Certificate, CertificateRepository, CertificateSubmission};
use portal_core::error::{PortalError, Result};
use portal_core::id::EntityId;
use portal_core::project::{Project, ProjectRepository, ProjectSubmission};
use portal_core::user::CurrentUser;
use tokio::sync::Notify;

#[derive(Default)]
pub struct InMemoryBackend {
    pub technologies: Mutex<Vec<Technology>>,
    pub students: Mutex<Vec<Student>>,
    pub projects: Mutex<Vec<Project>>,
    pub certificates: Mutex<Vec<Certificate>>,
    pub created_projects: Mutex<Vec<ProjectSubmission>>,
    pub updated_projects: Mutex<Vec<(EntityId, ProjectSubmission)>>,
    pub created_certificates: Mutex<Vec<CertificateSubmission>>,
    pub deleted: Mutex<Vec<EntityId>>,
    /// Returned by the catalog endpoints when set.
    pub catalog_error: Mutex<Option<PortalError>>,
    /// Returned by create/update/delete/list when set.
    pub write_error: Mutex<Option<PortalError>>,
    /// When set, create/update wait for a notification before answering.
    pub gate: Mutex<Option<Arc<Notify>>>,
}

impl InMemoryBackend {
    pub fn with_catalog() -> Self {
        let backend = Self::default();
        *backend.technologies.lock().unwrap() = serde_json::from_value(serde_json::json!([
            {"id": 1, "name": "Rust"},
            {"id": 2, "name": "Python"},
            {"id": 3, "name": "Go"}
        ]))
        .unwrap();
        *backend.students.lock().unwrap() = serde_json::from_value(serde_json::json!([
            {"id": 7, "username": "alice", "first_name": "Alice", "last_name": "Liddell"},
            {"id": 8, "username": "bob", "first_name": "Bob", "last_name": "Builder"}
        ]))
        .unwrap();
        backend
    }

    fn catalog_failure(&self) -> Result<()> {
        match self.catalog_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn write_failure(&self) -> Result<()> {
        match self.write_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn wait_for_gate(&self) {
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

pub fn alice() -> CurrentUser {
    serde_json::from_value(serde_json::json!({
        "id": 7, "username": "alice", "first_name": "Alice", "last_name": "Liddell"
    }))
    .unwrap()
}

#[async_trait]
impl CatalogRepository for InMemoryBackend {
    async fn technologies(&self) -> Result<Vec<Technology>> {
        self.catalog_failure()?;
        Ok(self.technologies.lock().unwrap().clone())
    }

    async fn students(&self) -> Result<Vec<Student>> {
        self.catalog_failure()?;
        Ok(self.students.lock().unwrap().clone())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryBackend {
    async fn list(&self) -> Result<Vec<Project>> {
        self.write_failure()?;
        Ok(self.projects.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Project> {
        self.projects
            .lock()
            .unwrap()
            .iter()
            .find(|project| &project.id == id)
            .cloned()
            .ok_or_else(|| PortalError::not_found("project", id.as_str()))
    }

    async fn create(&self, submission: &ProjectSubmission) -> Result<()> {
        self.wait_for_gate().await;
        self.write_failure()?;
        self.created_projects.lock().unwrap().push(submission.clone());
        Ok(())
    }

    async fn update(&self, id: &EntityId, submission: &ProjectSubmission) -> Result<()> {
        self.wait_for_gate().await;
        self.write_failure()?;
        self.updated_projects
            .lock()
            .unwrap()
            .push((id.clone(), submission.clone()));
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<()> {
        self.write_failure()?;
        self.projects.lock().unwrap().retain(|project| &project.id != id);
        self.deleted.lock().unwrap().push(id.clone());
        Ok(())
    }
}

#[async_trait]
impl CertificateRepository for InMemoryBackend {
    async fn list(&self) -> Result<Vec<Certificate>> {
        self.write_failure()?;
        Ok(self.certificates.lock().unwrap().clone())
    }

    async fn create(&self, submission: &CertificateSubmission) -> Result<()> {
        self.wait_for_gate().await;
        self.write_failure()?;
        self.created_certificates.lock().unwrap().push(submission.clone());
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<()> {
        self.write_failure()?;
        self.certificates
            .lock()
            .unwrap()
            .retain(|certificate| &certificate.id != id);
        self.deleted.lock().unwrap().push(id.clone());
        Ok(())
    }
}
