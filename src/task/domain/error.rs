//! Error types for task domain validation, guards, and parsing.

use super::{ModificationId, TaskId, TaskState};
use crate::error::ErrorKind;
use crate::identity::UserId;
use std::fmt;
use thiserror::Error;

/// Lifecycle operation named in transition errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOperation {
    /// Work submission by the assignee.
    Submit,
    /// Opening a negotiation over the task terms.
    Negotiate,
    /// Applying an admin decision on a modification request.
    ResolveModification,
    /// A user or admin acceptance vote.
    Verify,
}

impl TaskOperation {
    /// Returns the operation name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Negotiate => "negotiate",
            Self::ResolveModification => "resolve modification",
            Self::Verify => "verify",
        }
    }
}

impl fmt::Display for TaskOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned while constructing or mutating task domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The deliverables list is empty.
    #[error("task must declare at least one deliverable")]
    EmptyDeliverables,

    /// A deliverable entry is empty after trimming.
    #[error("deliverable at position {0} must not be empty")]
    EmptyDeliverable(usize),

    /// The submission link is empty after trimming.
    #[error("submission link must not be empty")]
    EmptySubmissionLink,

    /// The submission description is empty after trimming.
    #[error("submission description must not be empty")]
    EmptySubmissionDescription,

    /// A negotiation carries neither changes nor comments.
    #[error("negotiation must propose a change or explain the request")]
    EmptyProposal,

    /// The operation is not legal from the current status.
    #[error("task {task_id}: cannot {operation} while {from}")]
    InvalidTransition {
        /// Task that rejected the operation.
        task_id: TaskId,
        /// Status at the time of the attempt.
        from: TaskState,
        /// Attempted operation.
        operation: TaskOperation,
    },

    /// A reset may only target an open status.
    #[error("task status cannot be reset to {0}")]
    InvalidResetTarget(TaskState),

    /// The caller is not the user the task is assigned to.
    #[error("user {caller} is not the assignee of task {task_id}")]
    NotAssignee {
        /// Task the caller tried to act on.
        task_id: TaskId,
        /// Rejected caller principal.
        caller: UserId,
    },

    /// The operation requires the admin capability.
    #[error("user {0} lacks the admin role")]
    AdminRequired(UserId),

    /// The modification request has already been resolved.
    #[error("modification request {0} has already been resolved")]
    AlreadyResolved(ModificationId),

    /// A newer negotiation replaced the modification request.
    #[error("modification request {modification_id} was superseded by {latest}")]
    ModificationSuperseded {
        /// Stale modification request.
        modification_id: ModificationId,
        /// Most recent request on the same task.
        latest: ModificationId,
    },

    /// The modification request belongs to another task.
    #[error("modification request {modification_id} does not belong to task {task_id}")]
    ModificationTaskMismatch {
        /// Offending modification request.
        modification_id: ModificationId,
        /// Task the resolution was applied to.
        task_id: TaskId,
    },
}

impl TaskDomainError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyTitle
            | Self::EmptyDeliverables
            | Self::EmptyDeliverable(_)
            | Self::EmptySubmissionLink
            | Self::EmptySubmissionDescription
            | Self::EmptyProposal
            | Self::InvalidResetTarget(_)
            | Self::ModificationTaskMismatch { .. } => ErrorKind::Validation,
            Self::InvalidTransition { .. } | Self::ModificationSuperseded { .. } => {
                ErrorKind::InvalidTransition
            }
            Self::NotAssignee { .. } | Self::AdminRequired(_) => ErrorKind::Forbidden,
            Self::AlreadyResolved(_) => ErrorKind::AlreadyResolved,
        }
    }
}

/// Error returned while parsing task states from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task state: {0}")]
pub struct ParseTaskStateError(pub String);

/// Error returned while parsing task platforms.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task platform: {0}")]
pub struct ParsePlatformError(pub String);
