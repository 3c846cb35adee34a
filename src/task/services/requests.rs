//! Request payloads accepted by the task lifecycle service.

use crate::identity::{ProjectId, UserId};
use crate::task::domain::{
    ModificationDecision, ModificationId, Platform, ProposedChanges, TaskId, VerificationDecision,
};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(crate) project_id: ProjectId,
    pub(crate) assignee: UserId,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) platform: Platform,
    pub(crate) deliverables: Vec<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        assignee: UserId,
        title: impl Into<String>,
        platform: Platform,
    ) -> Self {
        Self {
            project_id,
            assignee,
            title: title.into(),
            description: String::new(),
            platform,
            deliverables: Vec::new(),
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the ordered deliverables.
    #[must_use]
    pub fn with_deliverables(mut self, deliverables: impl IntoIterator<Item = String>) -> Self {
        self.deliverables = deliverables.into_iter().collect();
        self
    }
}

/// Request payload for submitting work on a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTaskRequest {
    pub(crate) task_id: TaskId,
    pub(crate) link: String,
    pub(crate) description: String,
}

impl SubmitTaskRequest {
    /// Creates a submission request.
    #[must_use]
    pub fn new(task_id: TaskId, link: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            task_id,
            link: link.into(),
            description: description.into(),
        }
    }
}

/// Request payload for opening a negotiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiateTaskRequest {
    pub(crate) task_id: TaskId,
    pub(crate) changes: ProposedChanges,
    pub(crate) comments: String,
}

impl NegotiateTaskRequest {
    /// Creates a negotiation request.
    #[must_use]
    pub fn new(task_id: TaskId, changes: ProposedChanges) -> Self {
        Self {
            task_id,
            changes,
            comments: String::new(),
        }
    }

    /// Sets the requester's rationale.
    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }
}

/// Request payload for resolving a modification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveModificationRequest {
    pub(crate) modification_id: ModificationId,
    pub(crate) decision: ModificationDecision,
    pub(crate) comments: Option<String>,
}

impl ResolveModificationRequest {
    /// Creates a resolution request.
    #[must_use]
    pub const fn new(modification_id: ModificationId, decision: ModificationDecision) -> Self {
        Self {
            modification_id,
            decision,
            comments: None,
        }
    }

    /// Sets the admin's comments on the decision.
    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }
}

/// Request payload for a verification vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyTaskRequest {
    pub(crate) task_id: TaskId,
    pub(crate) decision: VerificationDecision,
}

impl VerifyTaskRequest {
    /// Creates a verification request.
    #[must_use]
    pub const fn new(task_id: TaskId, decision: VerificationDecision) -> Self {
        Self { task_id, decision }
    }
}

/// Request payload for forcing a task back to an open status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetTaskStatusRequest {
    pub(crate) task_id: TaskId,
    pub(crate) target_state: String,
}

impl ResetTaskStatusRequest {
    /// Creates a reset request. The target state is parsed by the service.
    #[must_use]
    pub fn new(task_id: TaskId, target_state: impl Into<String>) -> Self {
        Self {
            task_id,
            target_state: target_state.into(),
        }
    }
}
