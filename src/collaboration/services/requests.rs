//! Request payloads for collaboration operations.

use crate::collaboration::domain::{ApplicationDecision, ApplicationDetails, ApplicationId};
use crate::identity::ProjectId;

/// Request payload for applying to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyRequest {
    pub(crate) project_id: ProjectId,
    pub(crate) details: ApplicationDetails,
}

impl ApplyRequest {
    /// Creates an application request.
    #[must_use]
    pub const fn new(project_id: ProjectId, details: ApplicationDetails) -> Self {
        Self {
            project_id,
            details,
        }
    }
}

/// Request payload for an admin decision on an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecideApplicationRequest {
    pub(crate) application_id: ApplicationId,
    pub(crate) decision: ApplicationDecision,
}

impl DecideApplicationRequest {
    /// Creates a decision request.
    #[must_use]
    pub const fn new(application_id: ApplicationId, decision: ApplicationDecision) -> Self {
        Self {
            application_id,
            decision,
        }
    }
}
