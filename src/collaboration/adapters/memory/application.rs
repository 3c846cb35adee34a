//! Thread-safe in-memory application repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::collaboration::{
    domain::{ApplicationId, CollaborationApplication},
    ports::{ApplicationRepository, ApplicationRepositoryError, ApplicationRepositoryResult},
};
use crate::identity::{ProjectId, UserId};
use crate::revision::Revision;

/// In-memory application repository with a `(user, project)` index.
#[derive(Debug, Clone, Default)]
pub struct InMemoryApplicationRepository {
    state: Arc<RwLock<InMemoryApplicationState>>,
}

#[derive(Debug, Default)]
struct InMemoryApplicationState {
    applications: HashMap<ApplicationId, CollaborationApplication>,
    by_pair: HashMap<(UserId, ProjectId), ApplicationId>,
    insertion_order: Vec<ApplicationId>,
}

impl InMemoryApplicationRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ApplicationRepositoryResult<RwLockReadGuard<'_, InMemoryApplicationState>> {
        self.state.read().map_err(|err| {
            ApplicationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(
        &self,
    ) -> ApplicationRepositoryResult<RwLockWriteGuard<'_, InMemoryApplicationState>> {
        self.state.write().map_err(|err| {
            ApplicationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn insert(
        &self,
        application: &CollaborationApplication,
    ) -> ApplicationRepositoryResult<()> {
        let mut state = self.write()?;
        let pair = (application.user().clone(), application.project_id());
        if state.by_pair.contains_key(&pair) {
            return Err(ApplicationRepositoryError::DuplicateApplication {
                user: pair.0,
                project_id: pair.1,
            });
        }
        state.by_pair.insert(pair, application.id());
        state.insertion_order.push(application.id());
        state
            .applications
            .insert(application.id(), application.clone());
        Ok(())
    }

    async fn update(
        &self,
        application: &CollaborationApplication,
        expected: Revision,
    ) -> ApplicationRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .applications
            .get(&application.id())
            .ok_or(ApplicationRepositoryError::NotFound(application.id()))?;
        if stored.revision() != expected {
            return Err(ApplicationRepositoryError::RevisionConflict {
                id: application.id(),
                expected,
                actual: stored.revision(),
            });
        }
        state
            .applications
            .insert(application.id(), application.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: ApplicationId,
    ) -> ApplicationRepositoryResult<Option<CollaborationApplication>> {
        let state = self.read()?;
        Ok(state.applications.get(&id).cloned())
    }

    async fn find_for(
        &self,
        user: &UserId,
        project_id: ProjectId,
    ) -> ApplicationRepositoryResult<Option<CollaborationApplication>> {
        let state = self.read()?;
        Ok(state
            .by_pair
            .get(&(user.clone(), project_id))
            .and_then(|id| state.applications.get(id))
            .cloned())
    }

    async fn find_by_project(
        &self,
        project_id: ProjectId,
    ) -> ApplicationRepositoryResult<Vec<CollaborationApplication>> {
        let state = self.read()?;
        Ok(state
            .insertion_order
            .iter()
            .filter_map(|id| state.applications.get(id))
            .filter(|application| application.project_id() == project_id)
            .cloned()
            .collect())
    }
}
