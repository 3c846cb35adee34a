//! In-memory repository for task records and the modification ledger.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::identity::{ProjectId, UserId};
use crate::revision::Revision;
use crate::task::{
    domain::{ModificationId, ModificationRequest, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// A single lock guards tasks and ledger entries so compound writes commit
/// atomically.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    insertion_order: Vec<TaskId>,
    modifications: HashMap<ModificationId, ModificationRequest>,
    ledger: HashMap<TaskId, Vec<ModificationId>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Checks that the stored task still carries the revision the writer read.
fn check_revision(
    state: &InMemoryTaskState,
    task: &Task,
    expected: Revision,
) -> TaskRepositoryResult<()> {
    let stored = state
        .tasks
        .get(&task.id())
        .ok_or(TaskRepositoryError::NotFound(task.id()))?;
    if stored.revision() != expected {
        return Err(TaskRepositoryError::RevisionConflict {
            task_id: task.id(),
            expected,
            actual: stored.revision(),
        });
    }
    Ok(())
}

/// Collects tasks in insertion order that satisfy `predicate`.
fn collect_tasks(state: &InMemoryTaskState, predicate: impl Fn(&Task) -> bool) -> Vec<Task> {
    state
        .insertion_order
        .iter()
        .filter_map(|id| state.tasks.get(id))
        .filter(|task| predicate(task))
        .cloned()
        .collect()
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insertion_order.push(task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task, expected: Revision) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        check_revision(&state, task, expected)?;
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn record_negotiation(
        &self,
        task: &Task,
        expected: Revision,
        modification: &ModificationRequest,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        check_revision(&state, task, expected)?;
        if state.modifications.contains_key(&modification.id()) {
            return Err(TaskRepositoryError::DuplicateModification(
                modification.id(),
            ));
        }

        state
            .ledger
            .entry(modification.task_id())
            .or_default()
            .push(modification.id());
        state
            .modifications
            .insert(modification.id(), modification.clone());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn record_resolution(
        &self,
        task: &Task,
        expected: Revision,
        modification: &ModificationRequest,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .modifications
            .get(&modification.id())
            .ok_or(TaskRepositoryError::ModificationNotFound(modification.id()))?;
        if !stored.is_pending() {
            return Err(TaskRepositoryError::ModificationAlreadyResolved(
                modification.id(),
            ));
        }
        check_revision(&state, task, expected)?;

        state
            .modifications
            .insert(modification.id(), modification.clone());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(collect_tasks(&state, |task| task.project_id() == project_id))
    }

    async fn find_by_assignee(&self, assignee: &UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(collect_tasks(&state, |task| task.assignee() == assignee))
    }

    async fn find_modification(
        &self,
        id: ModificationId,
    ) -> TaskRepositoryResult<Option<ModificationRequest>> {
        let state = self.read()?;
        Ok(state.modifications.get(&id).cloned())
    }

    async fn modifications_for_task(
        &self,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Vec<ModificationRequest>> {
        let state = self.read()?;
        let trail = state
            .ledger
            .get(&task_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.modifications.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(trail)
    }
}
