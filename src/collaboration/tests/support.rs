//! Shared fixtures for collaboration unit tests.

use std::sync::Arc;

use crate::collaboration::{
    adapters::memory::InMemoryApplicationRepository,
    domain::{
        ApplicationDetails, AudienceType, Ecosystem, Niche, SelectionSet, SocialHandle,
        SocialPlatform,
    },
    services::CollaborationService,
};
use crate::identity::{Caller, ProjectId, UserId};
use crate::project::{adapters::memory::InMemoryProjectDirectory, domain::ProjectProfile};
use mockable::DefaultClock;
use rstest::fixture;

pub(super) type TestService =
    CollaborationService<InMemoryApplicationRepository, InMemoryProjectDirectory, DefaultClock>;

pub(super) fn applicant() -> Caller {
    Caller::user(UserId::new("ambassador@example.com").expect("valid principal"))
}

pub(super) fn admin() -> Caller {
    Caller::admin(UserId::new("admin@example.com").expect("valid principal"))
}

#[fixture]
pub(super) fn details() -> ApplicationDetails {
    ApplicationDetails::new()
        .with_languages(vec!["English".to_owned(), "Spanish".to_owned()])
        .with_niches(
            SelectionSet::new()
                .with(Niche::Defi)
                .with_note(Niche::Education, "weekly onboarding calls"),
        )
        .with_ecosystems(SelectionSet::new().with(Ecosystem::Ethereum))
        .with_audience(SelectionSet::new().with(AudienceType::Developers))
        .with_socials(vec![
            SocialHandle::new(SocialPlatform::Twitter, "@ambassador").expect("valid handle"),
        ])
        .with_description("Running a developer community for three years.")
}

/// Service wired to a directory holding one open and one closed project.
pub(super) struct Harness {
    pub(super) service: TestService,
    pub(super) open_project: ProjectId,
    pub(super) closed_project: ProjectId,
}

#[fixture]
pub(super) fn harness() -> Harness {
    let directory = InMemoryProjectDirectory::new();
    let open = ProjectProfile::new(ProjectId::new(), "Nebula")
        .expect("valid project")
        .with_collaboration(true);
    let closed = ProjectProfile::new(ProjectId::new(), "Quasar").expect("valid project");
    let open_project = open.id();
    let closed_project = closed.id();
    directory.publish(open).expect("directory accepts project");
    directory.publish(closed).expect("directory accepts project");

    let service = CollaborationService::new(
        Arc::new(InMemoryApplicationRepository::new()),
        Arc::new(directory),
        Arc::new(DefaultClock),
    );
    Harness {
        service,
        open_project,
        closed_project,
    }
}
