//! Domain model for checklist progress.

mod entry;
mod error;
mod record;

pub use entry::{ChecklistSubmission, EntryStatus, ProgressEntry, ReviewDecision};
pub use error::{ParseEntryStatusError, ProgressDomainError};
pub use record::{PersistedProgressData, ProgressRecord, SubmissionEffect};
