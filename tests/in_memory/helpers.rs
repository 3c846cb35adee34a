//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use ambassador::collaboration::{
    adapters::memory::InMemoryApplicationRepository, services::CollaborationService,
};
use ambassador::config::EngineConfig;
use ambassador::identity::{Caller, ProjectId, UserId};
use ambassador::progress::{adapters::memory::InMemoryProgressRepository, services::ProgressService};
use ambassador::project::{
    adapters::memory::InMemoryProjectDirectory,
    domain::{ChecklistItem, ChecklistKind, ChecklistTaskId, ProjectProfile},
};
use ambassador::task::{
    adapters::memory::{InMemoryEventLog, InMemoryTaskRepository},
    domain::{Platform, Task},
    services::{CreateTaskRequest, TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::fixture;
use tracing_subscriber::EnvFilter;

/// Task service wired to in-memory adapters.
pub type Tasks = TaskLifecycleService<InMemoryTaskRepository, InMemoryEventLog, DefaultClock>;

/// Progress service wired to in-memory adapters.
pub type Progress =
    ProgressService<InMemoryProgressRepository, InMemoryProjectDirectory, DefaultClock>;

/// Collaboration service wired to in-memory adapters.
pub type Collaboration =
    CollaborationService<InMemoryApplicationRepository, InMemoryProjectDirectory, DefaultClock>;

/// Points awarded by the social checklist item.
pub const FOLLOW_POINTS: u64 = 10;

/// Points awarded by the Discord checklist item.
pub const JOIN_POINTS: u64 = 25;

/// Routes engine logs to the test harness when `RUST_LOG` is set.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    if installed.is_err() {
        tracing::trace!("test subscriber already installed");
    }
}

/// Every service sharing one project directory.
pub struct Engine {
    /// Task lifecycle service.
    pub tasks: Tasks,
    /// Event feed written by `tasks`.
    pub events: InMemoryEventLog,
    /// Checklist progress service.
    pub progress: Progress,
    /// Ambassador application service.
    pub collaboration: Collaboration,
    /// The published project.
    pub project: ProjectProfile,
}

/// Builds an engine with the given configuration and one published project
/// that accepts ambassadors.
///
/// # Panics
///
/// Panics when the fixture catalog is invalid.
#[must_use]
pub fn build_engine(config: &EngineConfig) -> Engine {
    init_tracing();
    let directory = Arc::new(InMemoryProjectDirectory::new());
    let project = project_profile();
    directory
        .publish(project.clone())
        .expect("directory accepts project");

    let clock = Arc::new(DefaultClock);
    let events = InMemoryEventLog::new();
    let tasks = TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(events.clone()),
        Arc::clone(&clock),
    )
    .with_config(config.clone());
    let progress = ProgressService::new(
        Arc::new(InMemoryProgressRepository::new()),
        Arc::clone(&directory),
        Arc::clone(&clock),
    )
    .with_config(config.clone());
    let collaboration = CollaborationService::new(
        Arc::new(InMemoryApplicationRepository::new()),
        directory,
        clock,
    )
    .with_config(config.clone());

    Engine {
        tasks,
        events,
        progress,
        collaboration,
        project,
    }
}

/// Provides an engine with the default configuration.
#[fixture]
pub fn engine() -> Engine {
    build_engine(&EngineConfig::default())
}

/// Returns the published project with its two-item catalog.
///
/// # Panics
///
/// Panics when the fixture catalog is invalid.
#[must_use]
pub fn project_profile() -> ProjectProfile {
    let follow = ChecklistItem::new(
        follow_id(),
        ChecklistKind::Social,
        "Follow on X",
        FOLLOW_POINTS,
    )
    .expect("valid item");
    let join = ChecklistItem::new(join_id(), ChecklistKind::Discord, "Join Discord", JOIN_POINTS)
        .expect("valid item")
        .with_subtasks(vec!["verify".to_owned(), "say hello".to_owned()])
        .expect("valid subtasks");
    ProjectProfile::new(ProjectId::new(), "Nebula")
        .expect("valid project")
        .with_collaboration(true)
        .with_checklist(vec![follow, join])
        .expect("unique catalog")
}

/// Identifier of the social checklist item.
///
/// # Panics
///
/// Panics if the literal identifier is rejected.
#[must_use]
pub fn follow_id() -> ChecklistTaskId {
    ChecklistTaskId::new("follow-x").expect("valid id")
}

/// Identifier of the Discord checklist item.
///
/// # Panics
///
/// Panics if the literal identifier is rejected.
#[must_use]
pub fn join_id() -> ChecklistTaskId {
    ChecklistTaskId::new("join-discord").expect("valid id")
}

/// The member doing the work.
///
/// # Panics
///
/// Panics if the literal principal is rejected.
#[must_use]
pub fn member() -> Caller {
    Caller::user(UserId::new("ambassador@example.com").expect("valid principal"))
}

/// The project administrator.
///
/// # Panics
///
/// Panics if the literal principal is rejected.
#[must_use]
pub fn admin() -> Caller {
    Caller::admin(UserId::new("admin@example.com").expect("valid principal"))
}

/// Creates a pending task assigned to [`member`].
///
/// # Panics
///
/// Panics when the service rejects the task.
pub async fn create_task(engine: &Engine) -> Task {
    let request = CreateTaskRequest::new(
        engine.project.id(),
        member().principal().clone(),
        "Launch thread",
        Platform::Twitter,
    )
    .with_description("Write a launch thread")
    .with_deliverables(vec!["thread with 5+ posts".to_owned()]);
    engine
        .tasks
        .create_task(&admin(), request)
        .await
        .expect("task creation should succeed")
}
