//! Error types for checklist progress validation.

use super::EntryStatus;
use crate::error::ErrorKind;
use crate::project::domain::{ChecklistKind, ChecklistTaskId};
use thiserror::Error;

/// Errors returned by progress record transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProgressDomainError {
    /// The submission proof is empty after trimming.
    #[error("checklist submission proof must not be empty")]
    EmptyProof,

    /// The submitted kind does not match the catalog item.
    #[error("checklist item {task_id} is a {expected} item, not {actual}")]
    KindMismatch {
        /// Catalog item.
        task_id: ChecklistTaskId,
        /// Kind declared by the catalog.
        expected: ChecklistKind,
        /// Kind supplied by the caller.
        actual: ChecklistKind,
    },

    /// The submission does not carry one flag per declared subtask.
    #[error("checklist item {task_id} declares {expected} subtasks, submission carries {actual}")]
    SubtaskCountMismatch {
        /// Catalog item.
        task_id: ChecklistTaskId,
        /// Declared subtask count.
        expected: usize,
        /// Submitted flag count.
        actual: usize,
    },

    /// At least one declared subtask is not marked complete.
    #[error("checklist item {0} has incomplete subtasks")]
    IncompleteSubtasks(ChecklistTaskId),

    /// The record has no entry for the checklist item.
    #[error("no progress entry for checklist item {0}")]
    EntryNotFound(ChecklistTaskId),

    /// The entry is not waiting for an admin decision.
    #[error("checklist item {task_id} is {status}, not pending approval")]
    NotAwaitingApproval {
        /// Checklist item.
        task_id: ChecklistTaskId,
        /// Current entry status.
        status: EntryStatus,
    },
}

impl ProgressDomainError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyProof
            | Self::KindMismatch { .. }
            | Self::SubtaskCountMismatch { .. }
            | Self::IncompleteSubtasks(_) => ErrorKind::Validation,
            Self::EntryNotFound(_) => ErrorKind::NotFound,
            Self::NotAwaitingApproval { .. } => ErrorKind::InvalidTransition,
        }
    }
}

/// Error returned while parsing entry statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown progress entry status: {0}")]
pub struct ParseEntryStatusError(pub String);
