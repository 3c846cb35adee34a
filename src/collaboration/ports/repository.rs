//! Repository port for collaboration applications.

use crate::collaboration::domain::{ApplicationId, CollaborationApplication};
use crate::identity::{ProjectId, UserId};
use crate::revision::Revision;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for application repository operations.
pub type ApplicationRepositoryResult<T> = Result<T, ApplicationRepositoryError>;

/// Persistence contract for collaboration applications.
///
/// A `(user, project)` pair owns at most one application regardless of its
/// status.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Inserts a new application.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationRepositoryError::DuplicateApplication`] when the
    /// pair already has an application.
    async fn insert(&self, application: &CollaborationApplication)
    -> ApplicationRepositoryResult<()>;

    /// Persists changes to an existing application.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationRepositoryError::NotFound`] when the application
    /// does not exist and [`ApplicationRepositoryError::RevisionConflict`]
    /// when the stored revision differs from `expected`.
    async fn update(
        &self,
        application: &CollaborationApplication,
        expected: Revision,
    ) -> ApplicationRepositoryResult<()>;

    /// Finds an application by identifier.
    async fn find_by_id(
        &self,
        id: ApplicationId,
    ) -> ApplicationRepositoryResult<Option<CollaborationApplication>>;

    /// Finds the application a user filed for a project.
    async fn find_for(
        &self,
        user: &UserId,
        project_id: ProjectId,
    ) -> ApplicationRepositoryResult<Option<CollaborationApplication>>;

    /// Returns every application for a project, oldest first.
    async fn find_by_project(
        &self,
        project_id: ProjectId,
    ) -> ApplicationRepositoryResult<Vec<CollaborationApplication>>;
}

/// Errors returned by application repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ApplicationRepositoryError {
    /// The pair already has an application.
    #[error("{user} already applied to project {project_id}")]
    DuplicateApplication {
        /// Applicant.
        user: UserId,
        /// Project.
        project_id: ProjectId,
    },

    /// The application was not found.
    #[error("application not found: {0}")]
    NotFound(ApplicationId),

    /// Another writer committed a change after the application was read.
    #[error("application {id} changed concurrently: expected {expected}, found {actual}")]
    RevisionConflict {
        /// Application whose write was refused.
        id: ApplicationId,
        /// Revision the writer read.
        expected: Revision,
        /// Revision currently stored.
        actual: Revision,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ApplicationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
