//! Application services for task lifecycle orchestration.

mod lifecycle;
mod requests;

pub use lifecycle::{
    NegotiationOutcome, ResolutionOutcome, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService, Verification,
};
pub use requests::{
    CreateTaskRequest, NegotiateTaskRequest, ResetTaskStatusRequest, ResolveModificationRequest,
    SubmitTaskRequest, VerifyTaskRequest,
};
