//! Per-user, per-project progress record.

use super::{ChecklistSubmission, EntryStatus, ProgressDomainError, ProgressEntry, ReviewDecision};
use crate::config::RejectionPolicy;
use crate::identity::{ProjectId, UserId};
use crate::project::domain::{ChecklistItem, ChecklistKind, ChecklistTaskId, ProjectProfile};
use crate::revision::Revision;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// What a submission did to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum SubmissionEffect {
    /// The entry moved to pending approval and its points were added to the
    /// record total.
    Credited {
        /// Points added.
        points: u64,
    },
    /// The entry is pending approval; its points were already counted.
    AlreadyCredited,
    /// The entry is completed; the submission was ignored.
    AlreadyCompleted,
}

/// Checklist progress of one user on one project.
///
/// Point totals are running sums: each distinct checklist item is credited
/// at most once while its credit stands, no matter how often it is
/// resubmitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    user: UserId,
    project_id: ProjectId,
    entries: Vec<ProgressEntry>,
    total_points: u64,
    completed_tasks: u64,
    revision: Revision,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProgressData {
    /// Persisted owner.
    pub user: UserId,
    /// Persisted project.
    pub project_id: ProjectId,
    /// Persisted entries, in catalog order.
    pub entries: Vec<ProgressEntry>,
    /// Persisted point total.
    pub total_points: u64,
    /// Persisted completed-item count.
    pub completed_tasks: u64,
    /// Persisted revision.
    pub revision: Revision,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ProgressRecord {
    /// Creates a record with one pending entry per catalog item.
    #[must_use]
    pub fn seed(user: UserId, project: &ProjectProfile, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            user,
            project_id: project.id(),
            entries: project.checklist().iter().map(ProgressEntry::seeded).collect(),
            total_points: 0,
            completed_tasks: 0,
            revision: Revision::INITIAL,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProgressData) -> Self {
        Self {
            user: data.user,
            project_id: data.project_id,
            entries: data.entries,
            total_points: data.total_points,
            completed_tasks: data.completed_tasks,
            revision: data.revision,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the record owner.
    #[must_use]
    pub const fn user(&self) -> &UserId {
        &self.user
    }

    /// Returns the project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns all entries.
    #[must_use]
    pub fn entries(&self) -> &[ProgressEntry] {
        &self.entries
    }

    /// Returns the entry for a checklist item.
    #[must_use]
    pub fn entry(&self, task_id: &ChecklistTaskId) -> Option<&ProgressEntry> {
        self.entries.iter().find(|entry| entry.task_id() == task_id)
    }

    /// Returns the running point total.
    #[must_use]
    pub const fn total_points(&self) -> u64 {
        self.total_points
    }

    /// Returns the running completed-item count.
    #[must_use]
    pub const fn completed_tasks(&self) -> u64 {
        self.completed_tasks
    }

    /// Returns the stored revision.
    #[must_use]
    pub const fn revision(&self) -> Revision {
        self.revision
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Records a submission for a catalog item.
    ///
    /// A pending entry moves to pending approval and is credited with the
    /// item's points unless it already holds a credit. An item missing from
    /// the record because the catalog grew after seeding is appended.
    /// Submissions for completed entries change nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressDomainError::KindMismatch`] when `kind` differs from
    /// the catalog, or a subtask error when the submission does not complete
    /// every declared subtask.
    pub fn record_submission(
        &mut self,
        item: &ChecklistItem,
        kind: ChecklistKind,
        submission: ChecklistSubmission,
        clock: &impl Clock,
    ) -> Result<SubmissionEffect, ProgressDomainError> {
        if item.kind() != kind {
            return Err(ProgressDomainError::KindMismatch {
                task_id: item.id().clone(),
                expected: item.kind(),
                actual: kind,
            });
        }
        submission.check_against(item)?;

        let now = clock.utc();
        let effect = match self.entries.iter_mut().find(|entry| entry.task_id() == item.id()) {
            Some(entry) => accept_submission(entry, item, submission, now),
            None => {
                let mut entry = ProgressEntry::seeded(item);
                let effect = accept_submission(&mut entry, item, submission, now);
                self.entries.push(entry);
                effect
            }
        };

        match effect {
            SubmissionEffect::AlreadyCompleted => return Ok(effect),
            SubmissionEffect::Credited { points } => {
                self.total_points = self.total_points.saturating_add(points);
                self.completed_tasks = self.completed_tasks.saturating_add(1);
            }
            SubmissionEffect::AlreadyCredited => {}
        }
        self.touch(now);
        Ok(effect)
    }

    /// Applies an admin decision to an entry awaiting approval.
    ///
    /// Approval completes the entry. Rejection returns it to pending; under
    /// [`RejectionPolicy::ReversePoints`] the entry's credit is withdrawn
    /// from the totals as well.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressDomainError::EntryNotFound`] for an unknown item and
    /// [`ProgressDomainError::NotAwaitingApproval`] when the entry is not
    /// pending approval.
    pub fn review(
        &mut self,
        task_id: &ChecklistTaskId,
        decision: ReviewDecision,
        policy: RejectionPolicy,
        clock: &impl Clock,
    ) -> Result<(), ProgressDomainError> {
        let now = clock.utc();
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.task_id() == task_id)
            .ok_or_else(|| ProgressDomainError::EntryNotFound(task_id.clone()))?;
        if entry.status() != EntryStatus::PendingApproval {
            return Err(ProgressDomainError::NotAwaitingApproval {
                task_id: task_id.clone(),
                status: entry.status(),
            });
        }

        match decision {
            ReviewDecision::Approved => entry.complete(now),
            ReviewDecision::Rejected => {
                let withdraw = policy == RejectionPolicy::ReversePoints;
                if let Some(points) = entry.reopen(withdraw) {
                    self.total_points = self.total_points.saturating_sub(points);
                    self.completed_tasks = self.completed_tasks.saturating_sub(1);
                }
            }
        }
        self.touch(now);
        Ok(())
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.revision = self.revision.next();
        self.updated_at = now;
    }
}

fn accept_submission(
    entry: &mut ProgressEntry,
    item: &ChecklistItem,
    submission: ChecklistSubmission,
    now: DateTime<Utc>,
) -> SubmissionEffect {
    if entry.status() == EntryStatus::Completed {
        return SubmissionEffect::AlreadyCompleted;
    }
    entry.store_submission(submission, now);
    if entry.credited_points().is_some() {
        return SubmissionEffect::AlreadyCredited;
    }
    entry.credit(item.points());
    SubmissionEffect::Credited {
        points: item.points(),
    }
}
