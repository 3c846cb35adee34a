//! Request payloads for progress operations.

use crate::identity::{ProjectId, UserId};
use crate::progress::domain::{ChecklistSubmission, ReviewDecision};
use crate::project::domain::{ChecklistKind, ChecklistTaskId};

/// Request payload for submitting a checklist item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSubmissionRequest {
    pub(crate) project_id: ProjectId,
    pub(crate) task_id: ChecklistTaskId,
    pub(crate) kind: ChecklistKind,
    pub(crate) submission: ChecklistSubmission,
}

impl RecordSubmissionRequest {
    /// Creates a submission request.
    #[must_use]
    pub const fn new(
        project_id: ProjectId,
        task_id: ChecklistTaskId,
        kind: ChecklistKind,
        submission: ChecklistSubmission,
    ) -> Self {
        Self {
            project_id,
            task_id,
            kind,
            submission,
        }
    }
}

/// Request payload for an admin decision on a checklist submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewChecklistRequest {
    pub(crate) user: UserId,
    pub(crate) project_id: ProjectId,
    pub(crate) task_id: ChecklistTaskId,
    pub(crate) decision: ReviewDecision,
}

impl ReviewChecklistRequest {
    /// Creates a review request.
    #[must_use]
    pub const fn new(
        user: UserId,
        project_id: ProjectId,
        task_id: ChecklistTaskId,
        decision: ReviewDecision,
    ) -> Self {
        Self {
            user,
            project_id,
            task_id,
            decision,
        }
    }
}
