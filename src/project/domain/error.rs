//! Error types for project catalog validation and parsing.

use super::ChecklistTaskId;
use thiserror::Error;

/// Errors returned while constructing project catalog values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The checklist task identifier is empty after trimming.
    #[error("checklist task identifier must not be empty")]
    EmptyChecklistTaskId,

    /// The checklist item title is empty after trimming.
    #[error("checklist item title must not be empty")]
    EmptyChecklistTitle,

    /// A subtask label is empty after trimming.
    #[error("checklist item {0} declares an empty subtask")]
    EmptySubtask(ChecklistTaskId),

    /// Two catalog items share one identifier.
    #[error("duplicate checklist item: {0}")]
    DuplicateChecklistItem(ChecklistTaskId),

    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,
}

/// Error returned while parsing checklist kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown checklist kind: {0}")]
pub struct ParseChecklistKindError(pub String);
