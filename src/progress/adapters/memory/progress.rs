//! Thread-safe in-memory progress repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::identity::{ProjectId, UserId};
use crate::progress::{
    domain::ProgressRecord,
    ports::{ProgressRepository, ProgressRepositoryError, ProgressRepositoryResult},
};
use crate::revision::Revision;

type RecordKey = (UserId, ProjectId);

/// In-memory progress repository keyed by `(user, project)`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProgressRepository {
    state: Arc<RwLock<InMemoryProgressState>>,
}

#[derive(Debug, Default)]
struct InMemoryProgressState {
    records: HashMap<RecordKey, ProgressRecord>,
    insertion_order: Vec<RecordKey>,
}

impl InMemoryProgressRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ProgressRepositoryResult<RwLockReadGuard<'_, InMemoryProgressState>> {
        self.state.read().map_err(|err| {
            ProgressRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> ProgressRepositoryResult<RwLockWriteGuard<'_, InMemoryProgressState>> {
        self.state.write().map_err(|err| {
            ProgressRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn key_of(record: &ProgressRecord) -> RecordKey {
    (record.user().clone(), record.project_id())
}

#[async_trait]
impl ProgressRepository for InMemoryProgressRepository {
    async fn insert(&self, record: &ProgressRecord) -> ProgressRepositoryResult<()> {
        let mut state = self.write()?;
        let key = key_of(record);
        if state.records.contains_key(&key) {
            return Err(ProgressRepositoryError::DuplicateRecord {
                user: record.user().clone(),
                project_id: record.project_id(),
            });
        }
        state.insertion_order.push(key.clone());
        state.records.insert(key, record.clone());
        Ok(())
    }

    async fn update(
        &self,
        record: &ProgressRecord,
        expected: Revision,
    ) -> ProgressRepositoryResult<()> {
        let mut state = self.write()?;
        let key = key_of(record);
        let stored = state
            .records
            .get(&key)
            .ok_or_else(|| ProgressRepositoryError::NotFound {
                user: record.user().clone(),
                project_id: record.project_id(),
            })?;
        if stored.revision() != expected {
            return Err(ProgressRepositoryError::RevisionConflict {
                user: record.user().clone(),
                project_id: record.project_id(),
                expected,
                actual: stored.revision(),
            });
        }
        state.records.insert(key, record.clone());
        Ok(())
    }

    async fn find(
        &self,
        user: &UserId,
        project_id: ProjectId,
    ) -> ProgressRepositoryResult<Option<ProgressRecord>> {
        let state = self.read()?;
        Ok(state.records.get(&(user.clone(), project_id)).cloned())
    }

    async fn find_by_project(
        &self,
        project_id: ProjectId,
    ) -> ProgressRepositoryResult<Vec<ProgressRecord>> {
        let state = self.read()?;
        Ok(state
            .insertion_order
            .iter()
            .filter(|(_, project)| *project == project_id)
            .filter_map(|key| state.records.get(key))
            .cloned()
            .collect())
    }
}
