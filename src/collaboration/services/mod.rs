//! Application services for collaboration applications.

mod applications;
mod requests;

pub use applications::{CollaborationError, CollaborationResult, CollaborationService};
pub use requests::{ApplyRequest, DecideApplicationRequest};
