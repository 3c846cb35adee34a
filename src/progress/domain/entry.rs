//! Per-item progress entries.

use super::{ParseEntryStatusError, ProgressDomainError};
use crate::project::domain::{ChecklistItem, ChecklistKind, ChecklistTaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Approval status of one checklist item for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Nothing submitted yet, or the last submission was rejected.
    Pending,
    /// Submitted and waiting for an admin decision.
    PendingApproval,
    /// Approved by an admin.
    Completed,
}

impl EntryStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::PendingApproval => "pending_approval",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EntryStatus {
    type Error = ParseEntryStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "pending_approval" => Ok(Self::PendingApproval),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseEntryStatusError(value.to_owned())),
        }
    }
}

/// Admin decision on a checklist submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    /// Mark the item completed.
    Approved,
    /// Return the item to pending.
    Rejected,
}

/// Evidence a user submits for a checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistSubmission {
    proof: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    subtasks: Vec<bool>,
}

impl ChecklistSubmission {
    /// Creates a submission from a proof link or handle.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressDomainError::EmptyProof`] for blank input.
    pub fn new(proof: impl Into<String>) -> Result<Self, ProgressDomainError> {
        let raw = proof.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProgressDomainError::EmptyProof);
        }
        Ok(Self {
            proof: trimmed.to_owned(),
            subtasks: Vec::new(),
        })
    }

    /// Attaches per-subtask completion flags, in catalog order.
    #[must_use]
    pub fn with_subtasks(mut self, flags: impl IntoIterator<Item = bool>) -> Self {
        self.subtasks = flags.into_iter().collect();
        self
    }

    /// Returns the proof.
    #[must_use]
    pub fn proof(&self) -> &str {
        &self.proof
    }

    /// Returns the submitted subtask flags.
    #[must_use]
    pub fn subtasks(&self) -> &[bool] {
        &self.subtasks
    }

    /// Checks the flags against the catalog item's declared subtasks.
    pub(crate) fn check_against(&self, item: &ChecklistItem) -> Result<(), ProgressDomainError> {
        let declared = item.subtasks().len();
        if declared == 0 {
            return Ok(());
        }
        if self.subtasks.len() != declared {
            return Err(ProgressDomainError::SubtaskCountMismatch {
                task_id: item.id().clone(),
                expected: declared,
                actual: self.subtasks.len(),
            });
        }
        if self.subtasks.iter().any(|done| !done) {
            return Err(ProgressDomainError::IncompleteSubtasks(item.id().clone()));
        }
        Ok(())
    }
}

/// Progress of one checklist item inside a user's record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    task_id: ChecklistTaskId,
    kind: ChecklistKind,
    status: EntryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    submission: Option<ChecklistSubmission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    submitted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    subtasks: Vec<bool>,
    /// Points currently counted in the record total for this entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    credited_points: Option<u64>,
}

impl ProgressEntry {
    /// Creates a pending entry for a catalog item, with every declared
    /// subtask flag cleared.
    #[must_use]
    pub fn seeded(item: &ChecklistItem) -> Self {
        Self {
            task_id: item.id().clone(),
            kind: item.kind(),
            status: EntryStatus::Pending,
            submission: None,
            submitted_at: None,
            completed_at: None,
            subtasks: vec![false; item.subtasks().len()],
            credited_points: None,
        }
    }

    /// Returns the checklist item identifier.
    #[must_use]
    pub const fn task_id(&self) -> &ChecklistTaskId {
        &self.task_id
    }

    /// Returns the item channel.
    #[must_use]
    pub const fn kind(&self) -> ChecklistKind {
        self.kind
    }

    /// Returns the approval status.
    #[must_use]
    pub const fn status(&self) -> EntryStatus {
        self.status
    }

    /// Returns the latest submission.
    #[must_use]
    pub const fn submission(&self) -> Option<&ChecklistSubmission> {
        self.submission.as_ref()
    }

    /// Returns when the latest submission was recorded.
    #[must_use]
    pub const fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    /// Returns when an admin approved the entry.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the stored subtask completion flags.
    #[must_use]
    pub fn subtasks(&self) -> &[bool] {
        &self.subtasks
    }

    /// Returns the points counted in the record total for this entry.
    #[must_use]
    pub const fn credited_points(&self) -> Option<u64> {
        self.credited_points
    }

    pub(super) fn store_submission(&mut self, submission: ChecklistSubmission, at: DateTime<Utc>) {
        if !submission.subtasks().is_empty() {
            self.subtasks = submission.subtasks().to_vec();
        }
        self.submission = Some(submission);
        self.submitted_at = Some(at);
        self.status = EntryStatus::PendingApproval;
    }

    pub(super) fn credit(&mut self, points: u64) {
        self.credited_points = Some(points);
    }

    pub(super) fn complete(&mut self, at: DateTime<Utc>) {
        self.status = EntryStatus::Completed;
        self.completed_at = Some(at);
    }

    /// Returns the entry to pending and hands back the credited points when
    /// `withdraw` is set.
    pub(super) fn reopen(&mut self, withdraw: bool) -> Option<u64> {
        self.status = EntryStatus::Pending;
        self.submission = None;
        self.submitted_at = None;
        self.subtasks.iter_mut().for_each(|done| *done = false);
        if withdraw {
            self.credited_points.take()
        } else {
            None
        }
    }
}
