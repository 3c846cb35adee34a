//! Shared fixtures for progress unit tests.

use std::sync::Arc;

use crate::identity::{Caller, ProjectId, UserId};
use crate::progress::{
    adapters::memory::InMemoryProgressRepository, domain::ChecklistSubmission,
    services::ProgressService,
};
use crate::project::{
    adapters::memory::InMemoryProjectDirectory,
    domain::{ChecklistItem, ChecklistKind, ChecklistTaskId, ProjectProfile},
};
use mockable::DefaultClock;
use rstest::fixture;

pub(super) type TestService =
    ProgressService<InMemoryProgressRepository, InMemoryProjectDirectory, DefaultClock>;

pub(super) const FOLLOW_POINTS: u64 = 10;
pub(super) const JOIN_POINTS: u64 = 25;

pub(super) fn follow_id() -> ChecklistTaskId {
    ChecklistTaskId::new("follow-x").expect("valid id")
}

pub(super) fn join_id() -> ChecklistTaskId {
    ChecklistTaskId::new("join-server").expect("valid id")
}

pub(super) fn follow_item() -> ChecklistItem {
    ChecklistItem::new(
        follow_id(),
        ChecklistKind::Social,
        "Follow the project",
        FOLLOW_POINTS,
    )
    .expect("valid item")
}

pub(super) fn join_item() -> ChecklistItem {
    ChecklistItem::new(
        join_id(),
        ChecklistKind::Discord,
        "Join the server",
        JOIN_POINTS,
    )
    .expect("valid item")
    .with_subtasks(vec!["verify".to_owned(), "introduce yourself".to_owned()])
    .expect("valid subtasks")
}

#[fixture]
pub(super) fn project() -> ProjectProfile {
    ProjectProfile::new(ProjectId::new(), "Nebula")
        .expect("valid project")
        .with_checklist(vec![follow_item(), join_item()])
        .expect("unique catalog")
}

pub(super) fn member() -> Caller {
    Caller::user(UserId::new("ambassador@example.com").expect("valid principal"))
}

pub(super) fn admin() -> Caller {
    Caller::admin(UserId::new("admin@example.com").expect("valid principal"))
}

pub(super) fn proof() -> ChecklistSubmission {
    ChecklistSubmission::new("https://x.com/ambassador").expect("valid proof")
}

/// Progress service with its catalog directory, sharing one repository.
pub(super) struct Harness {
    pub(super) service: TestService,
    pub(super) directory: InMemoryProjectDirectory,
    pub(super) project: ProjectProfile,
}

pub(super) fn build_harness(project: ProjectProfile) -> Harness {
    let directory = InMemoryProjectDirectory::new();
    directory
        .publish(project.clone())
        .expect("directory accepts project");
    let service = ProgressService::new(
        Arc::new(InMemoryProgressRepository::new()),
        Arc::new(directory.clone()),
        Arc::new(DefaultClock),
    );
    Harness {
        service,
        directory,
        project,
    }
}

#[fixture]
pub(super) fn harness(project: ProjectProfile) -> Harness {
    build_harness(project)
}
