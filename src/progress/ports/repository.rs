//! Repository port for progress records.

use crate::identity::{ProjectId, UserId};
use crate::progress::domain::ProgressRecord;
use crate::revision::Revision;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for progress repository operations.
pub type ProgressRepositoryResult<T> = Result<T, ProgressRepositoryError>;

/// Persistence contract for progress records.
///
/// A `(user, project)` pair owns at most one record. Creation is guarded by
/// that uniqueness constraint and updates are compare-and-set against the
/// revision the caller read.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressRepositoryError::DuplicateRecord`] when the pair
    /// already has a record.
    async fn insert(&self, record: &ProgressRecord) -> ProgressRepositoryResult<()>;

    /// Persists changes to an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressRepositoryError::NotFound`] when no record exists
    /// and [`ProgressRepositoryError::RevisionConflict`] when the stored
    /// revision differs from `expected`.
    async fn update(
        &self,
        record: &ProgressRecord,
        expected: Revision,
    ) -> ProgressRepositoryResult<()>;

    /// Finds the record for a user on a project.
    async fn find(
        &self,
        user: &UserId,
        project_id: ProjectId,
    ) -> ProgressRepositoryResult<Option<ProgressRecord>>;

    /// Returns every record for a project, oldest first.
    async fn find_by_project(
        &self,
        project_id: ProjectId,
    ) -> ProgressRepositoryResult<Vec<ProgressRecord>>;
}

/// Errors returned by progress repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProgressRepositoryError {
    /// The pair already has a record.
    #[error("progress record already exists for {user} on project {project_id}")]
    DuplicateRecord {
        /// Record owner.
        user: UserId,
        /// Project.
        project_id: ProjectId,
    },

    /// No record exists for the pair.
    #[error("no progress record for {user} on project {project_id}")]
    NotFound {
        /// Record owner.
        user: UserId,
        /// Project.
        project_id: ProjectId,
    },

    /// Another writer committed a change after the record was read.
    #[error(
        "progress record for {user} on project {project_id} changed concurrently: \
         expected {expected}, found {actual}"
    )]
    RevisionConflict {
        /// Record owner.
        user: UserId,
        /// Project.
        project_id: ProjectId,
        /// Revision the writer read.
        expected: Revision,
        /// Revision currently stored.
        actual: Revision,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProgressRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
