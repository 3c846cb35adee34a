//! In-memory integration tests for the task lifecycle.

use std::sync::Arc;

use super::helpers::{Engine, admin, create_task, engine, member};
use ambassador::error::ErrorKind;
use ambassador::task::{
    domain::{
        Acceptance, ModificationDecision, ModificationStatus, ProposedChanges, TaskState,
        VerificationDecision, VerificationOutcome,
    },
    services::{
        NegotiateTaskRequest, ResetTaskStatusRequest, ResolveModificationRequest,
        SubmitTaskRequest, VerifyTaskRequest,
    },
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn negotiated_task_runs_through_to_acceptance(engine: Engine) {
    let task = create_task(&engine).await;

    let negotiation = engine
        .tasks
        .negotiate(
            &member(),
            NegotiateTaskRequest::new(
                task.id(),
                ProposedChanges::new().with_description("new desc"),
            )
            .with_comments("narrower scope"),
        )
        .await
        .expect("negotiation should open");
    assert_eq!(negotiation.task.state(), TaskState::Negotiation);

    let resolution = engine
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
    assert_eq!(resolution.modification.status(), ModificationStatus::Approved);
    assert_eq!(resolution.task.state(), TaskState::InProgress);
    assert_eq!(resolution.task.content().description(), "new desc");
    assert_eq!(resolution.task.content().title(), "Launch thread");

    let submitted = engine
        .tasks
        .submit(
            &member(),
            SubmitTaskRequest::new(task.id(), "http://x", "thread is live"),
        )
        .await
        .expect("submission should succeed");
    assert_eq!(submitted.state(), TaskState::Submitted);

    let first = engine
        .tasks
        .verify(
            &member(),
            VerifyTaskRequest::new(task.id(), VerificationDecision::Accepted),
        )
        .await
        .expect("assignee vote should succeed");
    assert_eq!(first.outcome, VerificationOutcome::AwaitingOtherParty);
    assert_eq!(first.task.state(), TaskState::Submitted);

    let second = engine
        .tasks
        .verify(
            &admin(),
            VerifyTaskRequest::new(task.id(), VerificationDecision::Accepted),
        )
        .await
        .expect("admin vote should succeed");
    assert_eq!(second.outcome, VerificationOutcome::Accepted);
    assert_eq!(second.task.state(), TaskState::Accepted);
    assert!(second.task.acceptance().is_complete());
    assert!(second.task.acceptance().timestamp.is_some());

    let stored = engine
        .tasks
        .find_task(task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(stored, Some(second.task));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn declined_task_recovers_through_reset(engine: Engine) {
    let task = create_task(&engine).await;
    engine
        .tasks
        .submit(
            &member(),
            SubmitTaskRequest::new(task.id(), "http://x", "first draft"),
        )
        .await
        .expect("submission should succeed");
    let declined = engine
        .tasks
        .verify(
            &admin(),
            VerifyTaskRequest::new(task.id(), VerificationDecision::Declined),
        )
        .await
        .expect("decline should succeed");
    assert_eq!(declined.task.state(), TaskState::Declined);

    let resubmit = engine
        .tasks
        .submit(
            &member(),
            SubmitTaskRequest::new(task.id(), "http://y", "second draft"),
        )
        .await
        .expect_err("declined task should refuse submissions");
    assert_eq!(resubmit.kind(), ErrorKind::InvalidTransition);

    let reset = engine
        .tasks
        .reset_status(
            &member(),
            ResetTaskStatusRequest::new(task.id(), "in_progress"),
        )
        .await
        .expect("reset should succeed");
    assert_eq!(reset.state(), TaskState::InProgress);
    assert_eq!(reset.acceptance(), &Acceptance::default());

    let submitted = engine
        .tasks
        .submit(
            &member(),
            SubmitTaskRequest::new(task.id(), "http://y", "second draft"),
        )
        .await
        .expect("reset task should accept submissions");
    assert_eq!(
        submitted.submission().map(|submission| submission.link()),
        Some("http://y")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_negotiation_keeps_original_terms(engine: Engine) {
    let task = create_task(&engine).await;
    let negotiation = engine
        .tasks
        .negotiate(
            &member(),
            NegotiateTaskRequest::new(task.id(), ProposedChanges::new().with_title("Short post")),
        )
        .await
        .expect("negotiation should open");

    let resolution = engine
        .tasks
        .resolve_modification(
            &admin(),
            ResolveModificationRequest::new(
                negotiation.modification.id(),
                ModificationDecision::Rejected,
            )
            .with_comments("scope stays"),
        )
        .await
        .expect("resolution should succeed");

    assert_eq!(resolution.task.state(), TaskState::Pending);
    assert_eq!(resolution.task.content().title(), "Launch thread");
    assert_eq!(
        resolution.modification.resolution_comments(),
        Some("scope stays")
    );
    let trail = engine
        .tasks
        .modifications_for_task(task.id())
        .await
        .expect("ledger lookup should succeed");
    assert_eq!(trail, vec![resolution.modification]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_votes_from_spawned_tasks_both_land(engine: Engine) {
    let task = create_task(&engine).await;
    engine
        .tasks
        .submit(
            &member(),
            SubmitTaskRequest::new(task.id(), "http://x", "done"),
        )
        .await
        .expect("submission should succeed");

    let task_id = task.id();
    let tasks = Arc::new(engine.tasks);
    let user_vote = {
        let tasks = Arc::clone(&tasks);
        tokio::spawn(async move {
            tasks
                .verify(
                    &member(),
                    VerifyTaskRequest::new(task_id, VerificationDecision::Accepted),
                )
                .await
        })
    };
    let admin_vote = {
        let tasks = Arc::clone(&tasks);
        tokio::spawn(async move {
            tasks
                .verify(
                    &admin(),
                    VerifyTaskRequest::new(task_id, VerificationDecision::Accepted),
                )
                .await
        })
    };
    user_vote
        .await
        .expect("join user vote")
        .expect("user vote should succeed");
    admin_vote
        .await
        .expect("join admin vote")
        .expect("admin vote should succeed");

    let stored = tasks
        .find_task(task_id)
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(stored.state(), TaskState::Accepted);
    assert!(stored.acceptance().user);
    assert!(stored.acceptance().admin);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn queries_scope_tasks_by_project_and_assignee(engine: Engine) {
    let first = create_task(&engine).await;
    let second = create_task(&engine).await;

    let for_project = engine
        .tasks
        .tasks_for_project(engine.project.id())
        .await
        .expect("project query should succeed");
    let for_user = engine
        .tasks
        .tasks_for_user(member().principal())
        .await
        .expect("assignee query should succeed");
    let for_admin = engine
        .tasks
        .tasks_for_user(admin().principal())
        .await
        .expect("assignee query should succeed");

    assert_eq!(for_project, vec![first.clone(), second.clone()]);
    assert_eq!(for_user, vec![first, second]);
    assert!(for_admin.is_empty());
}
