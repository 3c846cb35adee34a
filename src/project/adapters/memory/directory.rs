//! Thread-safe in-memory project directory for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::ProjectId;
use crate::project::{
    domain::ProjectProfile,
    ports::{ProjectDirectory, ProjectDirectoryError, ProjectDirectoryResult},
};

/// In-memory project directory keyed by project identifier.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectDirectory {
    projects: Arc<RwLock<HashMap<ProjectId, ProjectProfile>>>,
}

impl InMemoryProjectDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes or replaces a project profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDirectoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn publish(&self, profile: ProjectProfile) -> ProjectDirectoryResult<()> {
        let mut projects = self.projects.write().map_err(|err| {
            ProjectDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        projects.insert(profile.id(), profile);
        Ok(())
    }
}

#[async_trait]
impl ProjectDirectory for InMemoryProjectDirectory {
    async fn find_project(&self, id: ProjectId) -> ProjectDirectoryResult<Option<ProjectProfile>> {
        let projects = self.projects.read().map_err(|err| {
            ProjectDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(projects.get(&id).cloned())
    }
}
