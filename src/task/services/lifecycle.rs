//! Service layer driving the task status state machine.

use super::requests::{
    CreateTaskRequest, NegotiateTaskRequest, ResetTaskStatusRequest, ResolveModificationRequest,
    SubmitTaskRequest, VerifyTaskRequest,
};
use crate::config::EngineConfig;
use crate::error::ErrorKind;
use crate::identity::{Caller, ProjectId, UserId};
use crate::task::{
    domain::{
        ModificationId, ModificationRequest, ParseTaskStateError, Submission, Task, TaskContent,
        TaskDomainError, TaskEvent, TaskEventKind, TaskId, TaskState, VerificationOutcome,
    },
    ports::{TaskEventPublisher, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation or a lifecycle guard failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The requested target state could not be parsed.
    #[error(transparent)]
    InvalidState(#[from] ParseTaskStateError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The modification request does not exist.
    #[error("modification request not found: {0}")]
    ModificationNotFound(ModificationId),
}

impl TaskLifecycleError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::InvalidState(_) => ErrorKind::Validation,
            Self::NotFound(_) | Self::ModificationNotFound(_) => ErrorKind::NotFound,
            Self::Repository(err) => match err {
                TaskRepositoryError::DuplicateTask(_)
                | TaskRepositoryError::RevisionConflict { .. }
                | TaskRepositoryError::DuplicateModification(_) => ErrorKind::Conflict,
                TaskRepositoryError::NotFound(_) | TaskRepositoryError::ModificationNotFound(_) => {
                    ErrorKind::NotFound
                }
                TaskRepositoryError::ModificationAlreadyResolved(_) => ErrorKind::AlreadyResolved,
                TaskRepositoryError::Persistence(_) => ErrorKind::Persistence,
            },
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// A negotiation as committed: the new ledger entry and the task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiationOutcome {
    /// The pending modification request.
    pub modification: ModificationRequest,
    /// The task, now under negotiation.
    pub task: Task,
}

/// A resolution as committed: the resolved ledger entry and the task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOutcome {
    /// The resolved modification request.
    pub modification: ModificationRequest,
    /// The task after the decision was applied.
    pub task: Task,
}

/// A recorded verification vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// The task after the vote.
    pub task: Task,
    /// Whether the vote finalized the task or awaits the other party.
    pub outcome: VerificationOutcome,
}

/// Task lifecycle orchestration service.
///
/// Every mutation is a read-validate-write cycle against the repository's
/// compare-and-set update. When another writer commits between the read and
/// the write, the cycle restarts from fresh state, up to
/// [`EngineConfig::max_write_attempts`] times, so concurrent votes from the
/// assignee and an admin are both recorded.
#[derive(Clone)]
pub struct TaskLifecycleService<R, P, C>
where
    R: TaskRepository,
    P: TaskEventPublisher,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    publisher: Arc<P>,
    clock: Arc<C>,
    config: EngineConfig,
}

impl<R, P, C> TaskLifecycleService<R, P, C>
where
    R: TaskRepository,
    P: TaskEventPublisher,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, publisher: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            repository,
            publisher,
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

    /// Creates a pending task. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AdminRequired`] for non-admin callers,
    /// content validation errors, or [`TaskLifecycleError::Repository`] when
    /// persistence fails.
    pub async fn create_task(
        &self,
        caller: &Caller,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        ensure_admin(caller)?;
        let CreateTaskRequest {
            project_id,
            assignee,
            title,
            description,
            platform,
            deliverables,
        } = request;

        let content = TaskContent::new(title, description, platform, deliverables)?;
        let task = Task::new(project_id, assignee, content, &*self.clock);
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), project_id = %project_id, "task created");
        self.publish(&task, caller, TaskEventKind::Created).await;
        Ok(task)
    }

    /// Records the assignee's submission and moves the task to
    /// [`TaskState::Submitted`].
    ///
    /// A resubmission replaces the stored submission and resets both
    /// acceptance votes.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank link or description,
    /// [`TaskLifecycleError::NotFound`] for an unknown task,
    /// [`TaskDomainError::NotAssignee`] when the caller does not own the
    /// task, [`TaskDomainError::InvalidTransition`] when the task is
    /// finalized, or a repository error when the write fails.
    pub async fn submit(
        &self,
        caller: &Caller,
        request: SubmitTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        debug!(task_id = %request.task_id, caller = %caller.principal(), "submit");
        let submission = Submission::new(request.link, request.description, &*self.clock)?;
        let (task, ()) = self
            .mutate_task(request.task_id, |task, clock| {
                task.submit(caller, submission.clone(), clock)
            })
            .await?;
        info!(task_id = %task.id(), "task submitted");
        self.publish(&task, caller, TaskEventKind::Submitted).await;
        Ok(task)
    }

    /// Opens a negotiation over the task terms and appends the proposal to
    /// the modification ledger.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task,
    /// [`TaskDomainError::NotAssignee`] when the caller does not own the
    /// task, [`TaskDomainError::InvalidTransition`] unless the task is
    /// pending or in progress, [`TaskDomainError::EmptyProposal`] for an
    /// empty request, or a repository error when the write fails.
    pub async fn negotiate(
        &self,
        caller: &Caller,
        request: NegotiateTaskRequest,
    ) -> TaskLifecycleResult<NegotiationOutcome> {
        debug!(task_id = %request.task_id, caller = %caller.principal(), "negotiate");
        let attempts = self.config.write_attempts();
        let mut attempt = 1;
        loop {
            let mut task = self.load_task(request.task_id).await?;
            let expected = task.revision();
            task.open_negotiation(caller, &*self.clock)?;
            let modification = ModificationRequest::new(
                task.id(),
                caller.principal().clone(),
                request.changes.clone(),
                request.comments.clone(),
                &*self.clock,
            )?;

            match self
                .repository
                .record_negotiation(&task, expected, &modification)
                .await
            {
                Ok(()) => {
                    info!(
                        task_id = %task.id(),
                        modification_id = %modification.id(),
                        "negotiation opened"
                    );
                    let kind = TaskEventKind::NegotiationOpened {
                        modification_id: modification.id(),
                    };
                    self.publish(&task, caller, kind).await;
                    return Ok(NegotiationOutcome { modification, task });
                }
                Err(err) if is_retryable(&err, attempt, attempts) => {
                    attempt = self.back_off(task.id(), attempt).await;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Resolves a pending modification request. Admin only.
    ///
    /// An approval overlays the proposed changes and moves the task to
    /// [`TaskState::InProgress`]; a rejection returns it to
    /// [`TaskState::Pending`]. A request is resolved at most once.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AdminRequired`] for non-admin callers,
    /// [`TaskLifecycleError::ModificationNotFound`] for an unknown request,
    /// [`TaskDomainError::AlreadyResolved`] for a request that is no longer
    /// pending, [`TaskDomainError::ModificationSuperseded`] when a later
    /// negotiation on the task replaced it,
    /// [`TaskDomainError::InvalidTransition`] when the task is no longer
    /// under negotiation, or a repository error when the write fails.
    pub async fn resolve_modification(
        &self,
        caller: &Caller,
        request: ResolveModificationRequest,
    ) -> TaskLifecycleResult<ResolutionOutcome> {
        ensure_admin(caller)?;
        debug!(modification_id = %request.modification_id, "resolve modification");
        let attempts = self.config.write_attempts();
        let mut attempt = 1;
        loop {
            let mut modification = self.load_modification(request.modification_id).await?;
            if !modification.is_pending() {
                return Err(TaskDomainError::AlreadyResolved(modification.id()).into());
            }
            let mut task = self.load_task(modification.task_id()).await?;
            let expected = task.revision();
            self.ensure_latest_request(&modification).await?;

            modification.resolve(
                request.decision,
                caller.principal(),
                request.comments.clone(),
                &*self.clock,
            )?;
            task.apply_resolution(&modification, request.decision, &*self.clock)?;

            match self
                .repository
                .record_resolution(&task, expected, &modification)
                .await
            {
                Ok(()) => {
                    info!(
                        task_id = %task.id(),
                        modification_id = %modification.id(),
                        status = %modification.status(),
                        "modification resolved"
                    );
                    let kind = TaskEventKind::ModificationResolved {
                        modification_id: modification.id(),
                        status: modification.status(),
                    };
                    self.publish(&task, caller, kind).await;
                    return Ok(ResolutionOutcome { modification, task });
                }
                Err(err) if is_retryable(&err, attempt, attempts) => {
                    attempt = self.back_off(task.id(), attempt).await;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Records an acceptance or decline vote on a submitted task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task,
    /// [`TaskDomainError::NotAssignee`] when a user other than the assignee
    /// votes, [`TaskDomainError::InvalidTransition`] unless the task is
    /// submitted, or a repository error when the write fails.
    pub async fn verify(
        &self,
        caller: &Caller,
        request: VerifyTaskRequest,
    ) -> TaskLifecycleResult<Verification> {
        debug!(
            task_id = %request.task_id,
            caller = %caller.principal(),
            role = %caller.role(),
            "verify"
        );
        let (task, outcome) = self
            .mutate_task(request.task_id, |task, clock| {
                task.verify(caller, request.decision, clock)
            })
            .await?;
        info!(task_id = %task.id(), status = %task.state(), ?outcome, "verification recorded");
        let kind = TaskEventKind::Verified {
            decision: request.decision,
            outcome,
        };
        self.publish(&task, caller, kind).await;
        Ok(Verification { task, outcome })
    }

    /// Forces the task back to an open status and clears acceptance votes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidState`] when the target cannot be
    /// parsed, [`TaskDomainError::InvalidResetTarget`] for a closed target,
    /// [`TaskLifecycleError::NotFound`] for an unknown task,
    /// [`TaskDomainError::NotAssignee`] when the caller does not own the
    /// task, or a repository error when the write fails.
    pub async fn reset_status(
        &self,
        caller: &Caller,
        request: ResetTaskStatusRequest,
    ) -> TaskLifecycleResult<Task> {
        let target = TaskState::try_from(request.target_state.as_str())?;
        debug!(task_id = %request.task_id, %target, "reset status");
        let (task, ()) = self
            .mutate_task(request.task_id, |task, clock| {
                task.reset_status(caller, target, clock)
            })
            .await?;
        info!(task_id = %task.id(), status = %task.state(), "task status reset");
        self.publish(&task, caller, TaskEventKind::StatusReset).await;
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_task(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Returns all tasks owned by a project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn tasks_for_project(&self, project_id: ProjectId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.find_by_project(project_id).await?)
    }

    /// Returns all tasks assigned to a user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn tasks_for_user(&self, user: &UserId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.find_by_assignee(user).await?)
    }

    /// Retrieves a modification request by identifier.
    ///
    /// Returns `Ok(None)` when the request does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_modification(
        &self,
        id: ModificationId,
    ) -> TaskLifecycleResult<Option<ModificationRequest>> {
        Ok(self.repository.find_modification(id).await?)
    }

    /// Returns the negotiation trail of a task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn modifications_for_task(
        &self,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Vec<ModificationRequest>> {
        Ok(self.repository.modifications_for_task(task_id).await?)
    }

    /// Runs a single-record read-validate-write cycle, restarting on
    /// revision conflicts.
    async fn mutate_task<T>(
        &self,
        task_id: TaskId,
        mut apply: impl FnMut(&mut Task, &C) -> Result<T, TaskDomainError>,
    ) -> TaskLifecycleResult<(Task, T)> {
        let attempts = self.config.write_attempts();
        let mut attempt = 1;
        loop {
            let mut task = self.load_task(task_id).await?;
            let expected = task.revision();
            let outcome = apply(&mut task, &*self.clock)?;
            match self.repository.update(&task, expected).await {
                Ok(()) => return Ok((task, outcome)),
                Err(err) if is_retryable(&err, attempt, attempts) => {
                    attempt = self.back_off(task_id, attempt).await;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    async fn load_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }

    async fn load_modification(
        &self,
        id: ModificationId,
    ) -> TaskLifecycleResult<ModificationRequest> {
        self.repository
            .find_modification(id)
            .await?
            .ok_or(TaskLifecycleError::ModificationNotFound(id))
    }

    /// Only the newest request on a task is resolvable; the task revision
    /// check on write catches a negotiation opened after this read.
    async fn ensure_latest_request(
        &self,
        modification: &ModificationRequest,
    ) -> TaskLifecycleResult<()> {
        let ledger = self
            .repository
            .modifications_for_task(modification.task_id())
            .await?;
        match ledger.last() {
            Some(latest) if latest.id() != modification.id() => {
                Err(TaskDomainError::ModificationSuperseded {
                    modification_id: modification.id(),
                    latest: latest.id(),
                }
                .into())
            }
            _ => Ok(()),
        }
    }

    async fn back_off(&self, task_id: TaskId, attempt: u32) -> u32 {
        warn!(
            %task_id,
            attempt,
            max_attempts = self.config.write_attempts(),
            "task changed concurrently, retrying"
        );
        tokio::task::yield_now().await;
        attempt.saturating_add(1)
    }

    async fn publish(&self, task: &Task, caller: &Caller, kind: TaskEventKind) {
        let event = TaskEvent::record(task, caller, kind, &*self.clock);
        if let Err(err) = self.publisher.publish(&event).await {
            warn!(task_id = %task.id(), error = %err, "failed to publish task event");
        }
    }
}

fn ensure_admin(caller: &Caller) -> Result<(), TaskDomainError> {
    if caller.is_admin() {
        return Ok(());
    }
    Err(TaskDomainError::AdminRequired(caller.principal().clone()))
}

const fn is_retryable(err: &TaskRepositoryError, attempt: u32, attempts: u32) -> bool {
    matches!(err, TaskRepositoryError::RevisionConflict { .. }) && attempt < attempts
}
