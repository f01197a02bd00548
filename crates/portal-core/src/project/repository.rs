//! Project repository trait.

use async_trait::async_trait;

use super::draft::ProjectSubmission;
use super::model::Project;
use crate::error::Result;
use crate::id::EntityId;

/// Backend operations on projects.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Projects of the logged-in student.
    async fn list(&self) -> Result<Vec<Project>>;

    async fn find_by_id(&self, id: &EntityId) -> Result<Project>;

    async fn create(&self, submission: &ProjectSubmission) -> Result<()>;

    async fn update(&self, id: &EntityId, submission: &ProjectSubmission) -> Result<()>;

    async fn delete(&self, id: &EntityId) -> Result<()>;
}
