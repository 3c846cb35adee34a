//! Given steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, admin, assignee, run_async};
use ambassador::identity::ProjectId;
use ambassador::task::{
    domain::{Platform, VerificationDecision},
    services::{CreateTaskRequest, SubmitTaskRequest, VerifyTaskRequest},
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("a pending task assigned to the ambassador")]
fn pending_task(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(
        ProjectId::new(),
        assignee()?.principal().clone(),
        "Launch thread",
        Platform::Twitter,
    )
    .with_description("Write a launch thread")
    .with_deliverables(vec!["thread with 5+ posts".to_owned()]);

    let task = run_async(world.service.create_task(&admin()?, request))
        .wrap_err("create task for scenario")?;
    world.task = Some(task);
    Ok(())
}

#[given("a submitted task that an admin declined")]
fn declined_task(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    pending_task(world)?;
    let task_id = world.task_id()?;

    run_async(world.service.submit(
        &assignee()?,
        SubmitTaskRequest::new(task_id, "http://x", "first draft"),
    ))
    .wrap_err("submit task in scenario setup")?;
    let verification = run_async(world.service.verify(
        &admin()?,
        VerifyTaskRequest::new(task_id, VerificationDecision::Declined),
    ))
    .wrap_err("decline task in scenario setup")?;

    world.task = Some(verification.task);
    Ok(())
}
