//! Integration tests for the task event feed.

use std::sync::Arc;

use super::helpers::{Engine, admin, create_task, engine, init_tracing, member};
use ambassador::identity::{CallerRole, ProjectId};
use ambassador::task::{
    adapters::{TracingEventPublisher, memory::InMemoryTaskRepository},
    domain::{
        ModificationDecision, ModificationStatus, Platform, ProposedChanges, TaskEventKind,
        TaskState, VerificationDecision, VerificationOutcome,
    },
    services::{
        CreateTaskRequest, NegotiateTaskRequest, ResolveModificationRequest, SubmitTaskRequest,
        TaskLifecycleService, VerifyTaskRequest,
    },
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feed_records_actor_and_resulting_status(engine: Engine) {
    let task = create_task(&engine).await;
    let negotiation = engine
        .tasks
        .negotiate(
            &member(),
            NegotiateTaskRequest::new(
                task.id(),
                ProposedChanges::new().with_description("new desc"),
            ),
        )
        .await
        .expect("negotiation should open");
    engine
        .tasks
        .resolve_modification(
            &admin(),
            ResolveModificationRequest::new(
                negotiation.modification.id(),
                ModificationDecision::Approved,
            ),
        )
        .await
        .expect("resolution should succeed");
    engine
        .tasks
        .submit(
            &member(),
            SubmitTaskRequest::new(task.id(), "http://x", "live"),
        )
        .await
        .expect("submission should succeed");

    let feed = engine.events.events_for(task.id());
    let trail: Vec<_> = feed
        .iter()
        .map(|event| (event.kind.label(), event.actor_role, event.status))
        .collect();
    assert_eq!(
        trail,
        vec![
            ("created", CallerRole::Admin, TaskState::Pending),
            ("negotiation_opened", CallerRole::User, TaskState::Negotiation),
            ("modification_resolved", CallerRole::Admin, TaskState::InProgress),
            ("submitted", CallerRole::User, TaskState::Submitted),
        ]
    );
    assert_eq!(
        feed.get(2).map(|event| &event.kind),
        Some(&TaskEventKind::ModificationResolved {
            modification_id: negotiation.modification.id(),
            status: ModificationStatus::Approved,
        })
    );
    assert!(feed.iter().all(|event| event.project_id == engine.project.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feed_serializes_with_tagged_kinds(engine: Engine) {
    let task = create_task(&engine).await;
    engine
        .tasks
        .submit(
            &member(),
            SubmitTaskRequest::new(task.id(), "http://x", "live"),
        )
        .await
        .expect("submission should succeed");
    engine
        .tasks
        .verify(
            &member(),
            VerifyTaskRequest::new(task.id(), VerificationDecision::Accepted),
        )
        .await
        .expect("vote should succeed");

    let last = engine
        .events
        .events_for(task.id())
        .pop()
        .expect("feed should not be empty");
    let value = serde_json::to_value(&last).expect("event should serialize");

    assert_eq!(value["kind"]["type"], "verified");
    assert_eq!(value["kind"]["decision"], "ACCEPTED");
    assert_eq!(value["kind"]["outcome"], "awaiting_other_party");
    assert_eq!(value["status"], "SUBMITTED");
    assert_eq!(
        last.kind,
        TaskEventKind::Verified {
            decision: VerificationDecision::Accepted,
            outcome: VerificationOutcome::AwaitingOtherParty,
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn tracing_publisher_does_not_interfere_with_commits() {
    init_tracing();
    let service = TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(TracingEventPublisher::new()),
        Arc::new(DefaultClock),
    );
    let request = CreateTaskRequest::new(
        ProjectId::new(),
        member().principal().clone(),
        "Community call",
        Platform::Discord,
    )
    .with_deliverables(vec!["host a 30 minute call".to_owned()]);

    let task = service
        .create_task(&admin(), request)
        .await
        .expect("task creation should succeed");
    let stored = service
        .find_task(task.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(stored, Some(task));
}
