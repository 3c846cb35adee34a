//! Collaboration application state machine.

use super::{ApplicationDetails, ApplicationId, CollaborationDomainError, ParseApplicationStatusError};
use crate::identity::{ProjectId, UserId};
use crate::revision::Revision;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Review status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Awaiting an admin decision.
    Pending,
    /// Accepted. Final.
    Approved,
    /// Refused. Final.
    Rejected,
}

impl ApplicationStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns `true` for statuses with no outgoing transition.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ApplicationStatus {
    type Error = ParseApplicationStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseApplicationStatusError(value.to_owned())),
        }
    }
}

/// Admin decision on an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationDecision {
    /// Accept the applicant.
    Approved,
    /// Refuse the applicant.
    Rejected,
}

impl From<ApplicationDecision> for ApplicationStatus {
    fn from(decision: ApplicationDecision) -> Self {
        match decision {
            ApplicationDecision::Approved => Self::Approved,
            ApplicationDecision::Rejected => Self::Rejected,
        }
    }
}

/// A user's request to become an ambassador for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationApplication {
    id: ApplicationId,
    user: UserId,
    project_id: ProjectId,
    details: ApplicationDetails,
    status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    decided_by: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    decided_at: Option<DateTime<Utc>>,
    revision: Revision,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedApplicationData {
    /// Persisted identifier.
    pub id: ApplicationId,
    /// Persisted applicant.
    pub user: UserId,
    /// Persisted project.
    pub project_id: ProjectId,
    /// Persisted profile.
    pub details: ApplicationDetails,
    /// Persisted status.
    pub status: ApplicationStatus,
    /// Persisted deciding admin.
    pub decided_by: Option<UserId>,
    /// Persisted decision timestamp.
    pub decided_at: Option<DateTime<Utc>>,
    /// Persisted revision.
    pub revision: Revision,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl CollaborationApplication {
    /// Creates a pending application.
    ///
    /// # Errors
    ///
    /// Returns the first validation error reported by
    /// [`ApplicationDetails::validate`].
    pub fn new(
        user: UserId,
        project_id: ProjectId,
        details: ApplicationDetails,
        clock: &impl Clock,
    ) -> Result<Self, CollaborationDomainError> {
        details.validate()?;
        let timestamp = clock.utc();
        Ok(Self {
            id: ApplicationId::new(),
            user,
            project_id,
            details,
            status: ApplicationStatus::Pending,
            decided_by: None,
            decided_at: None,
            revision: Revision::INITIAL,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an application from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedApplicationData) -> Self {
        Self {
            id: data.id,
            user: data.user,
            project_id: data.project_id,
            details: data.details,
            status: data.status,
            decided_by: data.decided_by,
            decided_at: data.decided_at,
            revision: data.revision,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the application identifier.
    #[must_use]
    pub const fn id(&self) -> ApplicationId {
        self.id
    }

    /// Returns the applicant.
    #[must_use]
    pub const fn user(&self) -> &UserId {
        &self.user
    }

    /// Returns the project applied to.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the applicant profile.
    #[must_use]
    pub const fn details(&self) -> &ApplicationDetails {
        &self.details
    }

    /// Returns the review status.
    #[must_use]
    pub const fn status(&self) -> ApplicationStatus {
        self.status
    }

    /// Returns the admin who decided the application.
    #[must_use]
    pub const fn decided_by(&self) -> Option<&UserId> {
        self.decided_by.as_ref()
    }

    /// Returns when the application was decided.
    #[must_use]
    pub const fn decided_at(&self) -> Option<DateTime<Utc>> {
        self.decided_at
    }

    /// Returns the stored revision.
    #[must_use]
    pub const fn revision(&self) -> Revision {
        self.revision
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Records the admin decision.
    ///
    /// # Errors
    ///
    /// Returns [`CollaborationDomainError::NotPending`] when the application
    /// was already decided.
    pub fn decide(
        &mut self,
        decision: ApplicationDecision,
        admin: &UserId,
        clock: &impl Clock,
    ) -> Result<(), CollaborationDomainError> {
        if self.status.is_terminal() {
            return Err(CollaborationDomainError::NotPending {
                id: self.id,
                status: self.status,
            });
        }
        let now = clock.utc();
        self.status = decision.into();
        self.decided_by = Some(admin.clone());
        self.decided_at = Some(now);
        self.revision = self.revision.next();
        self.updated_at = now;
        Ok(())
    }
}
