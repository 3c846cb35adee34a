//! Domain model for task lifecycle management.
//!
//! The task domain models task content, the status state machine, the
//! negotiation ledger entries, and the audit events emitted on every
//! committed change, while keeping all infrastructure concerns outside of
//! the domain boundary.

mod content;
mod error;
mod event;
mod ids;
mod modification;
mod task;

pub use content::{Platform, ProposedChanges, TaskContent};
pub use error::{ParsePlatformError, ParseTaskStateError, TaskDomainError, TaskOperation};
pub use event::{TaskEvent, TaskEventKind};
pub use ids::{ModificationId, TaskId};
pub use modification::{ModificationDecision, ModificationRequest, ModificationStatus};
pub use task::{
    Acceptance, PersistedTaskData, Submission, Task, TaskState, VerificationDecision,
    VerificationOutcome,
};
