//! Domain model for the project catalog view.

mod checklist;
mod error;
mod profile;

pub use checklist::{ChecklistItem, ChecklistKind, ChecklistTaskId};
pub use error::{ParseChecklistKindError, ProjectDomainError};
pub use profile::ProjectProfile;
