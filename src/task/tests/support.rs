//! Shared fixtures for task lifecycle unit tests.

use std::sync::Arc;

use crate::identity::{Caller, ProjectId, UserId};
use crate::task::{
    adapters::memory::{InMemoryEventLog, InMemoryTaskRepository},
    domain::{Platform, Task, TaskContent},
    services::{CreateTaskRequest, TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::fixture;

pub(super) type TestService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryEventLog, DefaultClock>;

pub(super) fn principal(name: &str) -> UserId {
    UserId::new(name).expect("valid principal")
}

pub(super) fn assignee() -> Caller {
    Caller::user(principal("ambassador@example.com"))
}

pub(super) fn admin() -> Caller {
    Caller::admin(principal("admin@example.com"))
}

pub(super) fn stranger() -> Caller {
    Caller::user(principal("stranger@example.com"))
}

pub(super) fn content() -> TaskContent {
    TaskContent::new(
        "Launch thread",
        "Write a launch thread for the mainnet release",
        Platform::Twitter,
        vec!["thread with 5+ posts".to_owned(), "pinned for a week".to_owned()],
    )
    .expect("valid content")
}

#[fixture]
pub(super) fn clock() -> DefaultClock {
    DefaultClock
}

#[fixture]
pub(super) fn pending_task(clock: DefaultClock) -> Task {
    Task::new(
        ProjectId::new(),
        assignee().principal().clone(),
        content(),
        &clock,
    )
}

/// Service wired to in-memory adapters, with the event log kept for
/// inspection.
pub(super) struct Harness {
    pub(super) service: TestService,
    pub(super) events: InMemoryEventLog,
}

pub(super) fn build_harness() -> Harness {
    let events = InMemoryEventLog::new();
    let service = TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(events.clone()),
        Arc::new(DefaultClock),
    );
    Harness { service, events }
}

#[fixture]
pub(super) fn harness() -> Harness {
    build_harness()
}

#[fixture]
pub(super) fn service() -> TestService {
    build_harness().service
}

/// Creates a pending task through the service.
pub(super) async fn create_task(service: &TestService) -> Task {
    let request = CreateTaskRequest::new(
        ProjectId::new(),
        assignee().principal().clone(),
        "Launch thread",
        Platform::Twitter,
    )
    .with_description("Write a launch thread for the mainnet release")
    .with_deliverables(vec!["thread with 5+ posts".to_owned()]);
    service
        .create_task(&admin(), request)
        .await
        .expect("task creation should succeed")
}
