//! Crate-wide error classification.
//!
//! Each bounded context reports failures through its own service error
//! enum. Callers that only need to decide how to react (refresh state,
//! retry, or report a permission problem) classify those errors with
//! [`ErrorKind`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-facing classification of engine failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or malformed input. Always caller-recoverable.
    Validation,
    /// The operation is not legal in the record's current state. The caller
    /// must refresh state before retrying.
    InvalidTransition,
    /// The caller lacks the required role or ownership.
    Forbidden,
    /// A referenced record does not exist.
    NotFound,
    /// A uniqueness violation or a concurrent write collision.
    Conflict,
    /// A modification request was already resolved.
    AlreadyResolved,
    /// The target project does not accept the request.
    NotEligible,
    /// The storage adapter failed.
    Persistence,
}

impl ErrorKind {
    /// Returns the canonical snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::InvalidTransition => "invalid_transition",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::AlreadyResolved => "already_resolved",
            Self::NotEligible => "not_eligible",
            Self::Persistence => "persistence",
        }
    }

    /// Returns `true` when retrying the same request may succeed without the
    /// caller changing its input.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Conflict | Self::Persistence)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
