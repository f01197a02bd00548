//! Catalog repository trait.

use async_trait::async_trait;

use super::model::{Student, Technology};
use crate::error::Result;

/// Read access to the reference candidate lists.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// All known technologies.
    async fn technologies(&self) -> Result<Vec<Technology>>;

    /// All students that may be listed as contributors.
    async fn students(&self) -> Result<Vec<Student>>;
}
