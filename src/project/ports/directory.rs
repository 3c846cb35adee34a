//! Directory port resolving project identifiers to catalog profiles.

use crate::identity::ProjectId;
use crate::project::domain::ProjectProfile;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project directory operations.
pub type ProjectDirectoryResult<T> = Result<T, ProjectDirectoryError>;

/// Read access to published projects.
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    /// Finds a project profile by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find_project(&self, id: ProjectId) -> ProjectDirectoryResult<Option<ProjectProfile>>;
}

/// Errors returned by project directory implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectDirectoryError {
    /// Lookup-layer failure.
    #[error("project directory error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectDirectoryError {
    /// Wraps a lookup error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
