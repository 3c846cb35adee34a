//! Error types for collaboration application validation.

use super::{ApplicationId, ApplicationStatus, DetailCategory};
use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned by collaboration application construction and
/// transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollaborationDomainError {
    /// A required detail category is absent.
    #[error("application is missing {0}")]
    MissingDetail(DetailCategory),

    /// A custom selection carries a blank note.
    #[error("custom {0} entry needs a note")]
    EmptyNote(DetailCategory),

    /// An extension entry has a blank name.
    #[error("custom {0} entry needs a name")]
    EmptyExtensionName(DetailCategory),

    /// A social handle is blank.
    #[error("social handle must not be empty")]
    EmptySocialHandle,

    /// The application was already decided.
    #[error("application {id} is already {status}")]
    NotPending {
        /// Application.
        id: ApplicationId,
        /// Current status.
        status: ApplicationStatus,
    },
}

impl CollaborationDomainError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingDetail(_)
            | Self::EmptyNote(_)
            | Self::EmptyExtensionName(_)
            | Self::EmptySocialHandle => ErrorKind::Validation,
            Self::NotPending { .. } => ErrorKind::InvalidTransition,
        }
    }
}

/// Error returned while parsing application statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown application status: {0}")]
pub struct ParseApplicationStatusError(pub String);
