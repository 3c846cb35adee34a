//! Shared world state for task lifecycle BDD scenarios.

use std::sync::Arc;

use ambassador::identity::{Caller, UserId};
use ambassador::task::{
    adapters::memory::{InMemoryEventLog, InMemoryTaskRepository},
    domain::{ModificationRequest, Task, TaskId},
    services::{TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService},
};
use eyre::eyre;
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryEventLog, DefaultClock>;

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskLifecycleWorld {
    pub service: TestTaskService,
    pub task: Option<Task>,
    pub modification: Option<ModificationRequest>,
    pub last_error: Option<TaskLifecycleError>,
}

impl TaskLifecycleWorld {
    /// Creates a world with no task yet.
    #[must_use]
    pub fn new() -> Self {
        let service = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryEventLog::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            task: None,
            modification: None,
            last_error: None,
        }
    }

    /// Returns the identifier of the scenario task.
    ///
    /// # Errors
    ///
    /// Returns an error when no task was created yet.
    pub fn task_id(&self) -> Result<TaskId, eyre::Report> {
        self.task
            .as_ref()
            .map(Task::id)
            .ok_or_else(|| eyre!("missing task in scenario world"))
    }

    /// Keeps the updated task on success and the error otherwise.
    pub fn record(&mut self, result: TaskLifecycleResult<Task>) {
        match result {
            Ok(task) => {
                self.task = Some(task);
                self.last_error = None;
            }
            Err(err) => self.last_error = Some(err),
        }
    }
}

impl Default for TaskLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskLifecycleWorld {
    TaskLifecycleWorld::default()
}

/// The assignee of every scenario task.
///
/// # Errors
///
/// Returns an error if the literal principal is rejected.
pub fn assignee() -> Result<Caller, eyre::Report> {
    Ok(Caller::user(UserId::new("ambassador@example.com")?))
}

/// A project administrator.
///
/// # Errors
///
/// Returns an error if the literal principal is rejected.
pub fn admin() -> Result<Caller, eyre::Report> {
    Ok(Caller::admin(UserId::new("admin@example.com")?))
}

/// A user who does not own the scenario task.
///
/// # Errors
///
/// Returns an error if the literal principal is rejected.
pub fn stranger() -> Result<Caller, eyre::Report> {
    Ok(Caller::user(UserId::new("stranger@example.com")?))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
