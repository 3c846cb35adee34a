//! In-memory integration tests for ambassador applications.

use super::helpers::{Engine, admin, engine, member};
use ambassador::collaboration::{
    domain::{
        ApplicationDecision, ApplicationDetails, ApplicationStatus, AudienceType,
        CollaborationDomainError, DetailCategory, Ecosystem, Niche, Selection, SelectionSet,
        SocialHandle, SocialPlatform,
    },
    services::{ApplyRequest, CollaborationError, DecideApplicationRequest},
};
use ambassador::error::ErrorKind;
use ambassador::identity::ProjectId;
use rstest::{fixture, rstest};

#[fixture]
fn details() -> ApplicationDetails {
    ApplicationDetails::new()
        .with_languages(vec!["English".to_owned()])
        .with_niches(SelectionSet::new().with(Niche::Gaming))
        .with_ecosystems(
            SelectionSet::new()
                .with(Ecosystem::Solana)
                .with_extension("Sui", Selection::with_note("Move meetups")),
        )
        .with_audience(SelectionSet::new().with(AudienceType::Community))
        .with_socials(vec![
            SocialHandle::new(SocialPlatform::Telegram, "@ambassador").expect("valid handle"),
        ])
        .with_description("Host of a weekly gaming spaces show.")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn application_is_filed_once_and_decided_once(engine: Engine, details: ApplicationDetails) {
    let filed = engine
        .collaboration
        .apply(&member(), ApplyRequest::new(engine.project.id(), details.clone()))
        .await
        .expect("application should be filed");
    assert_eq!(filed.status(), ApplicationStatus::Pending);
    assert_eq!(filed.user(), member().principal());

    let duplicate = engine
        .collaboration
        .apply(&member(), ApplyRequest::new(engine.project.id(), details))
        .await
        .expect_err("second application should conflict");
    assert_eq!(duplicate.kind(), ErrorKind::Conflict);

    let approved = engine
        .collaboration
        .decide(
            &admin(),
            DecideApplicationRequest::new(filed.id(), ApplicationDecision::Approved),
        )
        .await
        .expect("decision should succeed");
    assert_eq!(approved.status(), ApplicationStatus::Approved);
    assert_eq!(approved.decided_by(), Some(admin().principal()));
    assert!(approved.decided_at().is_some());

    let again = engine
        .collaboration
        .decide(
            &admin(),
            DecideApplicationRequest::new(filed.id(), ApplicationDecision::Rejected),
        )
        .await
        .expect_err("decided applications are final");
    assert_eq!(again.kind(), ErrorKind::InvalidTransition);

    let listed = engine
        .collaboration
        .applications_for_project(engine.project.id())
        .await
        .expect("listing should succeed");
    assert_eq!(listed, vec![approved]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn extension_selections_survive_storage(engine: Engine, details: ApplicationDetails) {
    engine
        .collaboration
        .apply(&member(), ApplyRequest::new(engine.project.id(), details))
        .await
        .expect("application should be filed");

    let stored = engine
        .collaboration
        .application_for(member().principal(), engine.project.id())
        .await
        .expect("lookup should succeed")
        .expect("application should exist");
    let extensions: Vec<_> = stored
        .details()
        .ecosystems()
        .extensions()
        .map(|(name, selection)| (name.to_owned(), selection.note().map(str::to_owned)))
        .collect();
    assert_eq!(
        extensions,
        vec![("Sui".to_owned(), Some("Move meetups".to_owned()))]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn incomplete_profile_names_the_missing_category(engine: Engine) {
    let partial = ApplicationDetails::new()
        .with_languages(vec!["English".to_owned()])
        .with_niches(SelectionSet::new().with(Niche::Defi))
        .with_ecosystems(SelectionSet::new().with(Ecosystem::Ethereum));

    let err = engine
        .collaboration
        .apply(&member(), ApplyRequest::new(engine.project.id(), partial))
        .await
        .expect_err("incomplete profile should be rejected");

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(matches!(
        err,
        CollaborationError::Domain(CollaborationDomainError::MissingDetail(
            DetailCategory::Audience
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_project_is_not_found(engine: Engine, details: ApplicationDetails) {
    let err = engine
        .collaboration
        .apply(&member(), ApplyRequest::new(ProjectId::new(), details))
        .await
        .expect_err("unknown project should be rejected");

    assert_eq!(err.kind(), ErrorKind::NotFound);
}
