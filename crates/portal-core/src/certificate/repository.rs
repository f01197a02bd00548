//! Certificate repository trait.

use async_trait::async_trait;

use super::draft::CertificateSubmission;
use super::model::Certificate;
use crate::error::Result;
use crate::id::EntityId;

/// Backend operations on certificates.
#[async_trait]
pub trait CertificateRepository: Send + Sync {
    /// Certificates of the logged-in student.
    async fn list(&self) -> Result<Vec<Certificate>>;

    async fn create(&self, submission: &CertificateSubmission) -> Result<()>;

    async fn delete(&self, id: &EntityId) -> Result<()>;
}
