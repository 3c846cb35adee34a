//! Service layer aggregating checklist progress and points.

use super::requests::{RecordSubmissionRequest, ReviewChecklistRequest};
use crate::config::EngineConfig;
use crate::error::ErrorKind;
use crate::identity::{Caller, ProjectId, UserId};
use crate::progress::{
    domain::{ProgressDomainError, ProgressRecord, SubmissionEffect},
    ports::{ProgressRepository, ProgressRepositoryError},
};
use crate::project::{
    domain::{ChecklistTaskId, ProjectProfile},
    ports::{ProjectDirectory, ProjectDirectoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for progress operations.
#[derive(Debug, Error)]
pub enum ProgressServiceError {
    /// Domain validation or an entry guard failed.
    #[error(transparent)]
    Domain(#[from] ProgressDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProgressRepositoryError),
    /// Project lookup failed.
    #[error(transparent)]
    Directory(#[from] ProjectDirectoryError),
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The project catalog has no such checklist item.
    #[error("project {project_id} has no checklist item {task_id}")]
    ChecklistItemNotFound {
        /// Project searched.
        project_id: ProjectId,
        /// Requested item.
        task_id: ChecklistTaskId,
    },
    /// The user has no progress record on the project.
    #[error("no progress record for {user} on project {project_id}")]
    RecordNotFound {
        /// Record owner.
        user: UserId,
        /// Project.
        project_id: ProjectId,
    },
    /// The operation requires the admin capability.
    #[error("caller {0} is not an admin")]
    AdminRequired(UserId),
}

impl ProgressServiceError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => match err {
                ProgressRepositoryError::DuplicateRecord { .. }
                | ProgressRepositoryError::RevisionConflict { .. } => ErrorKind::Conflict,
                ProgressRepositoryError::NotFound { .. } => ErrorKind::NotFound,
                ProgressRepositoryError::Persistence(_) => ErrorKind::Persistence,
            },
            Self::Directory(_) => ErrorKind::Persistence,
            Self::ProjectNotFound(_)
            | Self::ChecklistItemNotFound { .. }
            | Self::RecordNotFound { .. } => ErrorKind::NotFound,
            Self::AdminRequired(_) => ErrorKind::Forbidden,
        }
    }
}

/// Result type for progress service operations.
pub type ProgressServiceResult<T> = Result<T, ProgressServiceError>;

/// A committed checklist submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// The record after the submission.
    pub record: ProgressRecord,
    /// What the submission did.
    pub effect: SubmissionEffect,
}

/// Checklist progress orchestration service.
///
/// Point values and subtask requirements come from the project catalog
/// served by the [`ProjectDirectory`]. Writes are optimistic: creation races
/// on the `(user, project)` uniqueness constraint and update races on the
/// record revision both restart the cycle from fresh state, so a concurrent
/// duplicate submission observes the first one's credit instead of adding
/// its own.
#[derive(Clone)]
pub struct ProgressService<R, D, C>
where
    R: ProgressRepository,
    D: ProjectDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    directory: Arc<D>,
    clock: Arc<C>,
    config: EngineConfig,
}

impl<R, D, C> ProgressService<R, D, C>
where
    R: ProgressRepository,
    D: ProjectDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a progress service with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            repository,
            directory,
            clock,
            config: EngineConfig::default(),
        }
    }

    /// Replaces the engine configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Records the caller's submission for a checklist item.
    ///
    /// The caller's record is created from the project catalog on first
    /// use. Repeated submissions of the same item credit its points once.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressServiceError::ProjectNotFound`] or
    /// [`ProgressServiceError::ChecklistItemNotFound`] for unknown targets,
    /// a [`ProgressDomainError`] for an invalid submission, or a repository
    /// error when the write fails.
    pub async fn record_submission(
        &self,
        caller: &Caller,
        request: RecordSubmissionRequest,
    ) -> ProgressServiceResult<SubmissionReceipt> {
        let user = caller.principal();
        let project_id = request.project_id;
        debug!(%user, %project_id, task_id = %request.task_id, "record checklist submission");
        let project = self.load_project(project_id).await?;
        let item = project.checklist_item(&request.task_id).ok_or_else(|| {
            ProgressServiceError::ChecklistItemNotFound {
                project_id,
                task_id: request.task_id.clone(),
            }
        })?;

        let attempts = self.config.write_attempts();
        let mut attempt = 1;
        loop {
            let stored = self.repository.find(user, project_id).await?;
            let expected = stored.as_ref().map(ProgressRecord::revision);
            let mut record = stored
                .unwrap_or_else(|| ProgressRecord::seed(user.clone(), &project, &*self.clock));
            let effect = record.record_submission(
                item,
                request.kind,
                request.submission.clone(),
                &*self.clock,
            )?;
            if effect == SubmissionEffect::AlreadyCompleted {
                debug!(%user, %project_id, task_id = %item.id(), "item already completed");
                return Ok(SubmissionReceipt { record, effect });
            }

            let write = match expected {
                Some(revision) => self.repository.update(&record, revision).await,
                None => self.repository.insert(&record).await,
            };
            match write {
                Ok(()) => {
                    info!(
                        %user,
                        %project_id,
                        task_id = %item.id(),
                        ?effect,
                        total_points = record.total_points(),
                        "checklist submission recorded"
                    );
                    return Ok(SubmissionReceipt { record, effect });
                }
                Err(err) if is_retryable(&err, attempt, attempts) => {
                    attempt = self.back_off(user, project_id, attempt).await;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Approves or rejects a submission awaiting review. Admin only.
    ///
    /// Rejection follows the configured
    /// [`RejectionPolicy`](crate::config::RejectionPolicy).
    ///
    /// # Errors
    ///
    /// Returns [`ProgressServiceError::AdminRequired`] for non-admin callers,
    /// [`ProgressServiceError::RecordNotFound`] or
    /// [`ProgressDomainError::EntryNotFound`] for unknown targets,
    /// [`ProgressDomainError::NotAwaitingApproval`] when the entry is not
    /// pending approval, or a repository error when the write fails.
    pub async fn approve_or_reject(
        &self,
        caller: &Caller,
        request: ReviewChecklistRequest,
    ) -> ProgressServiceResult<ProgressRecord> {
        if !caller.is_admin() {
            return Err(ProgressServiceError::AdminRequired(
                caller.principal().clone(),
            ));
        }
        let ReviewChecklistRequest {
            user,
            project_id,
            task_id,
            decision,
        } = request;
        debug!(%user, %project_id, %task_id, ?decision, "review checklist submission");

        let attempts = self.config.write_attempts();
        let mut attempt = 1;
        loop {
            let mut record = self.repository.find(&user, project_id).await?.ok_or_else(|| {
                ProgressServiceError::RecordNotFound {
                    user: user.clone(),
                    project_id,
                }
            })?;
            let expected = record.revision();
            record.review(
                &task_id,
                decision,
                self.config.rejection_policy,
                &*self.clock,
            )?;

            match self.repository.update(&record, expected).await {
                Ok(()) => {
                    info!(
                        %user,
                        %project_id,
                        %task_id,
                        ?decision,
                        total_points = record.total_points(),
                        "checklist submission reviewed"
                    );
                    return Ok(record);
                }
                Err(err) if is_retryable(&err, attempt, attempts) => {
                    attempt = self.back_off(&user, project_id, attempt).await;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Returns a user's record on a project.
    ///
    /// Returns `Ok(None)` when the user has not submitted anything yet.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn progress(
        &self,
        user: &UserId,
        project_id: ProjectId,
    ) -> ProgressServiceResult<Option<ProgressRecord>> {
        Ok(self.repository.find(user, project_id).await?)
    }

    /// Returns every record on a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn progress_for_project(
        &self,
        project_id: ProjectId,
    ) -> ProgressServiceResult<Vec<ProgressRecord>> {
        Ok(self.repository.find_by_project(project_id).await?)
    }

    async fn load_project(&self, project_id: ProjectId) -> ProgressServiceResult<ProjectProfile> {
        self.directory
            .find_project(project_id)
            .await?
            .ok_or(ProgressServiceError::ProjectNotFound(project_id))
    }

    async fn back_off(&self, user: &UserId, project_id: ProjectId, attempt: u32) -> u32 {
        warn!(
            %user,
            %project_id,
            attempt,
            max_attempts = self.config.write_attempts(),
            "progress record changed concurrently, retrying"
        );
        tokio::task::yield_now().await;
        attempt.saturating_add(1)
    }
}

const fn is_retryable(err: &ProgressRepositoryError, attempt: u32, attempts: u32) -> bool {
    matches!(
        err,
        ProgressRepositoryError::DuplicateRecord { .. }
            | ProgressRepositoryError::RevisionConflict { .. }
    ) && attempt < attempts
}
