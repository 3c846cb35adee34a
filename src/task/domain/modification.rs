//! Modification requests recorded in the negotiation ledger.

use super::{ModificationId, ProposedChanges, TaskDomainError, TaskId};
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Approval state of a modification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModificationStatus {
    /// Awaiting an admin decision.
    Pending,
    /// The proposed changes were applied.
    Approved,
    /// The proposed changes were refused.
    Rejected,
}

impl ModificationStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ModificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admin decision on a modification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModificationDecision {
    /// Apply the proposed changes.
    Approved,
    /// Refuse the proposed changes.
    Rejected,
}

impl From<ModificationDecision> for ModificationStatus {
    fn from(decision: ModificationDecision) -> Self {
        match decision {
            ModificationDecision::Approved => Self::Approved,
            ModificationDecision::Rejected => Self::Rejected,
        }
    }
}

/// A proposed change to a task's terms awaiting one-time resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModificationRequest {
    id: ModificationId,
    task_id: TaskId,
    proposed_changes: ProposedChanges,
    comments: String,
    requested_by: UserId,
    status: ModificationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolved_by: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolution_comments: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolved_at: Option<DateTime<Utc>>,
}

impl ModificationRequest {
    /// Creates a pending modification request.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyProposal`] when the request neither
    /// proposes a change nor explains itself in comments.
    pub fn new(
        task_id: TaskId,
        requested_by: UserId,
        proposed_changes: ProposedChanges,
        comments: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let comments_text = comments.into().trim().to_owned();
        if proposed_changes.is_empty() && comments_text.is_empty() {
            return Err(TaskDomainError::EmptyProposal);
        }
        Ok(Self {
            id: ModificationId::new(),
            task_id,
            proposed_changes,
            comments: comments_text,
            requested_by,
            status: ModificationStatus::Pending,
            resolved_by: None,
            resolution_comments: None,
            created_at: clock.utc(),
            resolved_at: None,
        })
    }

    /// Returns the request identifier.
    #[must_use]
    pub const fn id(&self) -> ModificationId {
        self.id
    }

    /// Returns the parent task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the proposed overlay.
    #[must_use]
    pub const fn proposed_changes(&self) -> &ProposedChanges {
        &self.proposed_changes
    }

    /// Returns the requester's rationale.
    #[must_use]
    pub fn comments(&self) -> &str {
        &self.comments
    }

    /// Returns the requesting principal.
    #[must_use]
    pub const fn requested_by(&self) -> &UserId {
        &self.requested_by
    }

    /// Returns the approval state.
    #[must_use]
    pub const fn status(&self) -> ModificationStatus {
        self.status
    }

    /// Returns the resolving admin, once resolved.
    #[must_use]
    pub const fn resolved_by(&self) -> Option<&UserId> {
        self.resolved_by.as_ref()
    }

    /// Returns the admin's comments on the resolution, if any.
    #[must_use]
    pub fn resolution_comments(&self) -> Option<&str> {
        self.resolution_comments.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the resolution timestamp, once resolved.
    #[must_use]
    pub const fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.resolved_at
    }

    /// Returns `true` while the request awaits a decision.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == ModificationStatus::Pending
    }

    /// Resolves the request. The status is immutable afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyResolved`] when the request is no
    /// longer pending.
    pub fn resolve(
        &mut self,
        decision: ModificationDecision,
        resolver: &UserId,
        comments: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.is_pending() {
            return Err(TaskDomainError::AlreadyResolved(self.id));
        }
        self.status = decision.into();
        self.resolved_by = Some(resolver.clone());
        self.resolution_comments = comments
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty());
        self.resolved_at = Some(clock.utc());
        Ok(())
    }
}
