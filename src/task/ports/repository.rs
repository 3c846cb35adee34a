//! Repository port for task records and the modification ledger.

use crate::identity::{ProjectId, UserId};
use crate::revision::Revision;
use crate::task::domain::{ModificationId, ModificationRequest, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Persistence contract for task records and their negotiation ledger.
///
/// Every write that modifies an existing task is a compare-and-set against
/// the revision the caller read. Writes that touch both a task and a ledger
/// entry are atomic: either both land or neither does.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// and [`TaskRepositoryError::RevisionConflict`] when the stored revision
    /// differs from `expected`.
    async fn update(&self, task: &Task, expected: Revision) -> TaskRepositoryResult<()>;

    /// Persists a task entering negotiation together with its new ledger
    /// entry.
    ///
    /// # Errors
    ///
    /// Returns the [`TaskRepository::update`] errors, plus
    /// [`TaskRepositoryError::DuplicateModification`] when the ledger already
    /// holds the entry.
    async fn record_negotiation(
        &self,
        task: &Task,
        expected: Revision,
        modification: &ModificationRequest,
    ) -> TaskRepositoryResult<()>;

    /// Persists a resolved ledger entry together with the resulting task.
    ///
    /// # Errors
    ///
    /// Returns the [`TaskRepository::update`] errors, plus
    /// [`TaskRepositoryError::ModificationNotFound`] when the entry is
    /// missing and [`TaskRepositoryError::ModificationAlreadyResolved`] when
    /// the stored entry is no longer pending.
    async fn record_resolution(
        &self,
        task: &Task,
        expected: Revision,
        modification: &ModificationRequest,
    ) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks owned by a project, oldest first.
    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks assigned to a user, oldest first.
    async fn find_by_assignee(&self, assignee: &UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Finds a ledger entry by identifier.
    ///
    /// Returns `None` when the entry does not exist.
    async fn find_modification(
        &self,
        id: ModificationId,
    ) -> TaskRepositoryResult<Option<ModificationRequest>>;

    /// Returns the negotiation trail of a task in the order it was recorded.
    async fn modifications_for_task(
        &self,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Vec<ModificationRequest>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Another writer committed a change after the task was read.
    #[error("task {task_id} changed concurrently: expected {expected}, found {actual}")]
    RevisionConflict {
        /// Task whose write was refused.
        task_id: TaskId,
        /// Revision the writer read.
        expected: Revision,
        /// Revision currently stored.
        actual: Revision,
    },

    /// A ledger entry with the same identifier already exists.
    #[error("duplicate modification request: {0}")]
    DuplicateModification(ModificationId),

    /// The ledger entry was not found.
    #[error("modification request not found: {0}")]
    ModificationNotFound(ModificationId),

    /// The stored ledger entry was resolved by another writer.
    #[error("modification request already resolved: {0}")]
    ModificationAlreadyResolved(ModificationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
