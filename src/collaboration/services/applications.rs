//! Service layer for the collaboration application state machine.

use super::requests::{ApplyRequest, DecideApplicationRequest};
use crate::collaboration::{
    domain::{ApplicationId, ApplicationStatus, CollaborationApplication, CollaborationDomainError},
    ports::{ApplicationRepository, ApplicationRepositoryError},
};
use crate::config::EngineConfig;
use crate::error::ErrorKind;
use crate::identity::{Caller, ProjectId, UserId};
use crate::project::ports::{ProjectDirectory, ProjectDirectoryError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for collaboration operations.
#[derive(Debug, Error)]
pub enum CollaborationError {
    /// Profile validation or a status guard failed.
    #[error(transparent)]
    Domain(#[from] CollaborationDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ApplicationRepositoryError),
    /// Project lookup failed.
    #[error(transparent)]
    Directory(#[from] ProjectDirectoryError),
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The project does not accept ambassador applications.
    #[error("project {0} is not open for collaboration")]
    NotEligible(ProjectId),
    /// The user already applied to the project.
    #[error("{user} already applied to project {project_id} ({status})")]
    AlreadyApplied {
        /// Applicant.
        user: UserId,
        /// Project.
        project_id: ProjectId,
        /// Status of the existing application.
        status: ApplicationStatus,
    },
    /// The application does not exist.
    #[error("application not found: {0}")]
    ApplicationNotFound(ApplicationId),
    /// The operation requires the admin capability.
    #[error("caller {0} is not an admin")]
    AdminRequired(UserId),
}

impl CollaborationError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => match err {
                ApplicationRepositoryError::DuplicateApplication { .. }
                | ApplicationRepositoryError::RevisionConflict { .. } => ErrorKind::Conflict,
                ApplicationRepositoryError::NotFound(_) => ErrorKind::NotFound,
                ApplicationRepositoryError::Persistence(_) => ErrorKind::Persistence,
            },
            Self::Directory(_) => ErrorKind::Persistence,
            Self::ProjectNotFound(_) | Self::ApplicationNotFound(_) => ErrorKind::NotFound,
            Self::NotEligible(_) => ErrorKind::NotEligible,
            Self::AlreadyApplied { .. } => ErrorKind::Conflict,
            Self::AdminRequired(_) => ErrorKind::Forbidden,
        }
    }
}

/// Result type for collaboration service operations.
pub type CollaborationResult<T> = Result<T, CollaborationError>;

/// Collaboration application orchestration service.
#[derive(Clone)]
pub struct CollaborationService<R, D, C>
where
    R: ApplicationRepository,
    D: ProjectDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    directory: Arc<D>,
    clock: Arc<C>,
    config: EngineConfig,
}

impl<R, D, C> CollaborationService<R, D, C>
where
    R: ApplicationRepository,
    D: ProjectDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a collaboration service with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            repository,
            directory,
            clock,
            config: EngineConfig::default(),
        }
    }

    /// Replaces the engine configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Files the caller's application for a project.
    ///
    /// Checks run in order: profile completeness, project existence,
    /// collaboration eligibility, then uniqueness of the pair. A pair that
    /// already holds an application of any status is refused.
    ///
    /// # Errors
    ///
    /// Returns [`CollaborationDomainError::MissingDetail`] for an incomplete
    /// profile, [`CollaborationError::ProjectNotFound`],
    /// [`CollaborationError::NotEligible`] when collaboration is disabled,
    /// [`CollaborationError::AlreadyApplied`] or a duplicate repository
    /// error for a second application, or a repository error when the write
    /// fails.
    pub async fn apply(
        &self,
        caller: &Caller,
        request: ApplyRequest,
    ) -> CollaborationResult<CollaborationApplication> {
        let user = caller.principal();
        let ApplyRequest {
            project_id,
            details,
        } = request;
        debug!(%user, %project_id, "apply for collaboration");

        let application =
            CollaborationApplication::new(user.clone(), project_id, details, &*self.clock)?;
        let project = self
            .directory
            .find_project(project_id)
            .await?
            .ok_or(CollaborationError::ProjectNotFound(project_id))?;
        if !project.collaboration_enabled() {
            return Err(CollaborationError::NotEligible(project_id));
        }
        if let Some(existing) = self.repository.find_for(user, project_id).await? {
            return Err(CollaborationError::AlreadyApplied {
                user: user.clone(),
                project_id,
                status: existing.status(),
            });
        }

        self.repository.insert(&application).await?;
        info!(
            %user,
            %project_id,
            application_id = %application.id(),
            "collaboration application filed"
        );
        Ok(application)
    }

    /// Approves or rejects a pending application. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`CollaborationError::AdminRequired`] for non-admin callers,
    /// [`CollaborationError::ApplicationNotFound`] for an unknown
    /// application, [`CollaborationDomainError::NotPending`] when it was
    /// already decided, or a repository error when the write fails.
    pub async fn decide(
        &self,
        caller: &Caller,
        request: DecideApplicationRequest,
    ) -> CollaborationResult<CollaborationApplication> {
        if !caller.is_admin() {
            return Err(CollaborationError::AdminRequired(
                caller.principal().clone(),
            ));
        }
        let DecideApplicationRequest {
            application_id,
            decision,
        } = request;
        debug!(%application_id, ?decision, "decide collaboration application");

        let attempts = self.config.write_attempts();
        let mut attempt = 1;
        loop {
            let mut application = self
                .repository
                .find_by_id(application_id)
                .await?
                .ok_or(CollaborationError::ApplicationNotFound(application_id))?;
            let expected = application.revision();
            application.decide(decision, caller.principal(), &*self.clock)?;

            match self.repository.update(&application, expected).await {
                Ok(()) => {
                    info!(
                        %application_id,
                        status = %application.status(),
                        "collaboration application decided"
                    );
                    return Ok(application);
                }
                Err(ApplicationRepositoryError::RevisionConflict { .. }) if attempt < attempts => {
                    warn!(
                        %application_id,
                        attempt,
                        max_attempts = attempts,
                        "application changed concurrently, retrying"
                    );
                    tokio::task::yield_now().await;
                    attempt = attempt.saturating_add(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Retrieves an application by identifier.
    ///
    /// Returns `Ok(None)` when the application does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`CollaborationError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_application(
        &self,
        id: ApplicationId,
    ) -> CollaborationResult<Option<CollaborationApplication>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns the application a user filed for a project.
    ///
    /// # Errors
    ///
    /// Returns [`CollaborationError::Repository`] when persistence lookup
    /// fails.
    pub async fn application_for(
        &self,
        user: &UserId,
        project_id: ProjectId,
    ) -> CollaborationResult<Option<CollaborationApplication>> {
        Ok(self.repository.find_for(user, project_id).await?)
    }

    /// Returns every application filed for a project, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`CollaborationError::Repository`] when persistence lookup
    /// fails.
    pub async fn applications_for_project(
        &self,
        project_id: ProjectId,
    ) -> CollaborationResult<Vec<CollaborationApplication>> {
        Ok(self.repository.find_by_project(project_id).await?)
    }
}
