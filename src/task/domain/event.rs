//! Audit events emitted after every committed task mutation.

use super::{
    ModificationId, ModificationStatus, Task, TaskId, TaskState, VerificationDecision,
    VerificationOutcome,
};
use crate::identity::{Caller, CallerRole, ProjectId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// What happened to the task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskEventKind {
    /// An admin created the task.
    Created,
    /// The assignee submitted work.
    Submitted,
    /// The assignee opened a negotiation.
    NegotiationOpened {
        /// Ledger entry carrying the proposal.
        modification_id: ModificationId,
    },
    /// An admin resolved a modification request.
    ModificationResolved {
        /// Resolved ledger entry.
        modification_id: ModificationId,
        /// Final status of the entry.
        status: ModificationStatus,
    },
    /// A party voted on the submission.
    Verified {
        /// The recorded vote.
        decision: VerificationDecision,
        /// Resulting outcome.
        outcome: VerificationOutcome,
    },
    /// The assignee forced the status back to an open state.
    StatusReset,
}

impl TaskEventKind {
    /// Returns a short label for log lines.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Submitted => "submitted",
            Self::NegotiationOpened { .. } => "negotiation_opened",
            Self::ModificationResolved { .. } => "modification_resolved",
            Self::Verified { .. } => "verified",
            Self::StatusReset => "status_reset",
        }
    }
}

/// Audit record for the task message feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEvent {
    /// Task the event concerns.
    pub task_id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Principal that performed the operation.
    pub actor: UserId,
    /// Role the actor held.
    pub actor_role: CallerRole,
    /// What happened.
    pub kind: TaskEventKind,
    /// Task status after the operation.
    pub status: TaskState,
    /// When the event was recorded.
    pub occurred_at: DateTime<Utc>,
}

impl TaskEvent {
    /// Builds an event describing the committed state of `task`.
    #[must_use]
    pub fn record(task: &Task, actor: &Caller, kind: TaskEventKind, clock: &impl Clock) -> Self {
        Self {
            task_id: task.id(),
            project_id: task.project_id(),
            actor: actor.principal().clone(),
            actor_role: actor.role(),
            kind,
            status: task.state(),
            occurred_at: clock.utc(),
        }
    }
}
