//! Optimistic concurrency revision counter shared by stored records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic write counter used for compare-and-set persistence.
///
/// Every committed mutation of a record advances its revision by one.
/// Repositories accept a write only when the stored revision equals the
/// revision the writer originally read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(u64);

impl Revision {
    /// Revision assigned to freshly created records.
    pub const INITIAL: Self = Self(0);

    /// Creates a revision from a persisted value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the revision following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns the underlying counter value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}
