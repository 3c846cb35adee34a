//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, admin, assignee, run_async, stranger};
use ambassador::identity::Caller;
use ambassador::task::{
    domain::{ModificationDecision, ProposedChanges, VerificationDecision},
    services::{
        NegotiateTaskRequest, ResetTaskStatusRequest, ResolveModificationRequest,
        SubmitTaskRequest, VerifyTaskRequest,
    },
};
use eyre::eyre;
use rstest_bdd_macros::when;

#[when(r#"the ambassador proposes the description "{description}""#)]
fn propose_description(
    world: &mut TaskLifecycleWorld,
    description: String,
) -> Result<(), eyre::Report> {
    let request = NegotiateTaskRequest::new(
        world.task_id()?,
        ProposedChanges::new().with_description(description),
    );
    match run_async(world.service.negotiate(&assignee()?, request)) {
        Ok(outcome) => {
            world.modification = Some(outcome.modification);
            world.task = Some(outcome.task);
        }
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}

#[when("an admin approves the modification request")]
fn approve_modification(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    resolve(world, ModificationDecision::Approved)
}

#[when("an admin rejects the modification request")]
fn reject_modification(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    resolve(world, ModificationDecision::Rejected)
}

#[when(r#"the ambassador submits the link "{link}""#)]
fn submit_link(world: &mut TaskLifecycleWorld, link: String) -> Result<(), eyre::Report> {
    let request = SubmitTaskRequest::new(world.task_id()?, link, "work is live");
    let result = run_async(world.service.submit(&assignee()?, request));
    world.record(result);
    Ok(())
}

#[when("the ambassador accepts the submission")]
fn assignee_accepts(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    accept_as(world, &assignee()?)
}

#[when("an admin accepts the submission")]
fn admin_accepts(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    accept_as(world, &admin()?)
}

#[when("another user accepts the submission")]
fn stranger_accepts(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    accept_as(world, &stranger()?)
}

#[when(r#"the ambassador resets the task to "{target}""#)]
fn reset_task(world: &mut TaskLifecycleWorld, target: String) -> Result<(), eyre::Report> {
    let request = ResetTaskStatusRequest::new(world.task_id()?, target);
    let result = run_async(world.service.reset_status(&assignee()?, request));
    world.record(result);
    Ok(())
}

fn resolve(
    world: &mut TaskLifecycleWorld,
    decision: ModificationDecision,
) -> Result<(), eyre::Report> {
    let modification_id = world
        .modification
        .as_ref()
        .map(|modification| modification.id())
        .ok_or_else(|| eyre!("missing modification request in scenario world"))?;
    let request = ResolveModificationRequest::new(modification_id, decision);
    let result = run_async(world.service.resolve_modification(&admin()?, request))
        .map(|outcome| outcome.task);
    world.record(result);
    Ok(())
}

fn accept_as(world: &mut TaskLifecycleWorld, caller: &Caller) -> Result<(), eyre::Report> {
    let request = VerifyTaskRequest::new(world.task_id()?, VerificationDecision::Accepted);
    let result = run_async(world.service.verify(caller, request)).map(|vote| vote.task);
    world.record(result);
    Ok(())
}
