//! Application services for checklist progress.

mod aggregator;
mod requests;

pub use aggregator::{ProgressService, ProgressServiceError, ProgressServiceResult, SubmissionReceipt};
pub use requests::{RecordSubmissionRequest, ReviewChecklistRequest};
