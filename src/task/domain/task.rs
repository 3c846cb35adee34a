//! Task aggregate root and its status state machine.

use super::{
    ModificationDecision, ModificationRequest, ParseTaskStateError, ProposedChanges, TaskContent,
    TaskDomainError, TaskId, TaskOperation,
};
use crate::identity::{Caller, CallerRole, ProjectId, UserId};
use crate::revision::Revision;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    /// Assigned, work not yet started.
    Pending,
    /// Terms are under negotiation.
    Negotiation,
    /// Negotiated terms were approved and work is under way.
    InProgress,
    /// Work has been submitted and awaits both acceptance votes.
    Submitted,
    /// Both parties accepted the submission.
    Accepted,
    /// A party declined the submission.
    Declined,
}

impl TaskState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Negotiation => "NEGOTIATION",
            Self::InProgress => "IN_PROGRESS",
            Self::Submitted => "SUBMITTED",
            Self::Accepted => "ACCEPTED",
            Self::Declined => "DECLINED",
        }
    }

    /// Returns `true` when work may still be submitted from this status.
    #[must_use]
    pub const fn accepts_submission(self) -> bool {
        matches!(
            self,
            Self::Pending | Self::InProgress | Self::Negotiation | Self::Submitted
        )
    }

    /// Returns `true` when a negotiation may be opened from this status.
    #[must_use]
    pub const fn accepts_negotiation(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }

    /// Returns `true` when this status is a legal reset target.
    #[must_use]
    pub const fn is_reset_target(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress | Self::Negotiation)
    }

    /// Returns `true` if no lifecycle operation other than a reset leaves
    /// this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Declined)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskState {
    type Error = ParseTaskStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "PENDING" => Ok(Self::Pending),
            "NEGOTIATION" => Ok(Self::Negotiation),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "SUBMITTED" => Ok(Self::Submitted),
            "ACCEPTED" => Ok(Self::Accepted),
            "DECLINED" => Ok(Self::Declined),
            _ => Err(ParseTaskStateError(value.to_owned())),
        }
    }
}

/// Dual-party acceptance vote on a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acceptance {
    /// The assignee accepted the submission.
    pub user: bool,
    /// An admin accepted the submission.
    pub admin: bool,
    /// When the second vote finalized the task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Acceptance {
    /// Returns `true` when both parties voted to accept.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.user && self.admin
    }
}

/// Work submitted by the assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    link: String,
    description: String,
    submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Creates a submission record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptySubmissionLink`] for a blank link and
    /// [`TaskDomainError::EmptySubmissionDescription`] for a blank
    /// description.
    pub fn new(
        link: impl Into<String>,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let raw_link = link.into();
        let trimmed_link = raw_link.trim();
        if trimmed_link.is_empty() {
            return Err(TaskDomainError::EmptySubmissionLink);
        }
        let raw_description = description.into();
        let trimmed_description = raw_description.trim();
        if trimmed_description.is_empty() {
            return Err(TaskDomainError::EmptySubmissionDescription);
        }
        Ok(Self {
            link: trimmed_link.to_owned(),
            description: trimmed_description.to_owned(),
            submitted_at: clock.utc(),
        })
    }

    /// Returns the link to the delivered work.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Returns the submitter's description of the work.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns when the submission was made.
    #[must_use]
    pub const fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

/// A party's verdict on a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationDecision {
    /// The party accepts the submitted work.
    Accepted,
    /// The party declines the submitted work.
    Declined,
}

/// Result of a recorded verification vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// Both parties accepted; the task is finalized.
    Accepted,
    /// The vote was recorded; the other party has not accepted yet.
    AwaitingOtherParty,
    /// The submission was declined.
    Declined,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    assignee: UserId,
    content: TaskContent,
    state: TaskState,
    acceptance: Acceptance,
    submission: Option<Submission>,
    revision: Revision,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Assigned user.
    pub assignee: UserId,
    /// Persisted terms.
    pub content: TaskContent,
    /// Persisted lifecycle status.
    pub state: TaskState,
    /// Persisted acceptance votes.
    pub acceptance: Acceptance,
    /// Persisted submission, if any.
    pub submission: Option<Submission>,
    /// Persisted write revision.
    pub revision: Revision,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task assigned to `assignee`.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        assignee: UserId,
        content: TaskContent,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            project_id,
            assignee,
            content,
            state: TaskState::Pending,
            acceptance: Acceptance::default(),
            submission: None,
            revision: Revision::INITIAL,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            assignee: data.assignee,
            content: data.content,
            state: data.state,
            acceptance: data.acceptance,
            submission: data.submission,
            revision: data.revision,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the assigned user.
    #[must_use]
    pub const fn assignee(&self) -> &UserId {
        &self.assignee
    }

    /// Returns the current terms.
    #[must_use]
    pub const fn content(&self) -> &TaskContent {
        &self.content
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Returns the acceptance votes.
    #[must_use]
    pub const fn acceptance(&self) -> &Acceptance {
        &self.acceptance
    }

    /// Returns the latest submission, if any.
    #[must_use]
    pub const fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    /// Returns the write revision.
    #[must_use]
    pub const fn revision(&self) -> Revision {
        self.revision
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Records a submission and moves the task to [`TaskState::Submitted`].
    ///
    /// Submitting again while already submitted is last-write-wins: the
    /// previous submission is replaced. This engine also clears any
    /// acceptance votes cast on the replaced submission, so both parties
    /// vote again on the new proof.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAssignee`] when the caller is not the
    /// assigned user and [`TaskDomainError::InvalidTransition`] when the task
    /// is accepted or declined.
    pub fn submit(
        &mut self,
        caller: &Caller,
        submission: Submission,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_assignee(caller)?;
        self.ensure(self.state.accepts_submission(), TaskOperation::Submit)?;

        if self.state == TaskState::Submitted {
            self.acceptance = Acceptance::default();
        }
        self.submission = Some(submission);
        self.state = TaskState::Submitted;
        self.touch(clock);
        Ok(())
    }

    /// Moves the task into [`TaskState::Negotiation`].
    ///
    /// The caller is responsible for appending the matching
    /// [`ModificationRequest`] to the ledger in the same write.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAssignee`] when the caller is not the
    /// assigned user and [`TaskDomainError::InvalidTransition`] unless the
    /// task is pending or in progress.
    pub fn open_negotiation(
        &mut self,
        caller: &Caller,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_assignee(caller)?;
        self.ensure(self.state.accepts_negotiation(), TaskOperation::Negotiate)?;

        self.state = TaskState::Negotiation;
        self.touch(clock);
        Ok(())
    }

    /// Applies the resolution of a modification request.
    ///
    /// An approval overlays the proposed changes and moves the task to
    /// [`TaskState::InProgress`]; a rejection returns it to
    /// [`TaskState::Pending`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ModificationTaskMismatch`] when the request
    /// belongs to another task and [`TaskDomainError::InvalidTransition`]
    /// unless the task is under negotiation.
    pub fn apply_resolution(
        &mut self,
        modification: &ModificationRequest,
        decision: ModificationDecision,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if modification.task_id() != self.id {
            return Err(TaskDomainError::ModificationTaskMismatch {
                modification_id: modification.id(),
                task_id: self.id,
            });
        }
        self.ensure(
            self.state == TaskState::Negotiation,
            TaskOperation::ResolveModification,
        )?;

        match decision {
            ModificationDecision::Approved => {
                self.apply_changes(modification.proposed_changes());
                self.state = TaskState::InProgress;
            }
            ModificationDecision::Rejected => self.state = TaskState::Pending,
        }
        self.touch(clock);
        Ok(())
    }

    /// Records a verification vote from the assignee or an admin.
    ///
    /// A decline finalizes immediately regardless of earlier votes. An
    /// acceptance finalizes only once both parties have accepted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAssignee`] when a user other than the
    /// assignee votes and [`TaskDomainError::InvalidTransition`] unless the
    /// task is submitted.
    pub fn verify(
        &mut self,
        caller: &Caller,
        decision: VerificationDecision,
        clock: &impl Clock,
    ) -> Result<VerificationOutcome, TaskDomainError> {
        if caller.role() == CallerRole::User {
            self.ensure_assignee(caller)?;
        }
        self.ensure(self.state == TaskState::Submitted, TaskOperation::Verify)?;

        let outcome = match decision {
            VerificationDecision::Declined => {
                self.state = TaskState::Declined;
                VerificationOutcome::Declined
            }
            VerificationDecision::Accepted => {
                match caller.role() {
                    CallerRole::User => self.acceptance.user = true,
                    CallerRole::Admin => self.acceptance.admin = true,
                }
                if self.acceptance.is_complete() {
                    self.state = TaskState::Accepted;
                    self.acceptance.timestamp = Some(clock.utc());
                    VerificationOutcome::Accepted
                } else {
                    VerificationOutcome::AwaitingOtherParty
                }
            }
        };
        self.touch(clock);
        Ok(outcome)
    }

    /// Forces the task back to an open status and clears acceptance votes.
    ///
    /// No transition guard applies beyond the target status: this is the
    /// recovery path for tasks stuck in a dead end.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAssignee`] when the caller is not the
    /// assigned user and [`TaskDomainError::InvalidResetTarget`] unless the
    /// target is pending, in progress, or under negotiation.
    pub fn reset_status(
        &mut self,
        caller: &Caller,
        target: TaskState,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_assignee(caller)?;
        if !target.is_reset_target() {
            return Err(TaskDomainError::InvalidResetTarget(target));
        }

        self.state = target;
        self.acceptance = Acceptance::default();
        self.touch(clock);
        Ok(())
    }

    fn apply_changes(&mut self, changes: &ProposedChanges) {
        changes.apply_to(&mut self.content);
    }

    fn ensure_assignee(&self, caller: &Caller) -> Result<(), TaskDomainError> {
        if caller.is_user(&self.assignee) {
            return Ok(());
        }
        Err(TaskDomainError::NotAssignee {
            task_id: self.id,
            caller: caller.principal().clone(),
        })
    }

    fn ensure(&self, allowed: bool, operation: TaskOperation) -> Result<(), TaskDomainError> {
        if allowed {
            return Ok(());
        }
        Err(TaskDomainError::InvalidTransition {
            task_id: self.id,
            from: self.state,
            operation,
        })
    }

    /// Advances the revision and the `updated_at` timestamp.
    fn touch(&mut self, clock: &impl Clock) {
        self.revision = self.revision.next();
        self.updated_at = clock.utc();
    }
}
