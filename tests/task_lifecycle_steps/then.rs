//! Then steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use ambassador::task::domain::{Task, TaskState};
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::then;

fn stored_task(world: &TaskLifecycleWorld) -> Result<Task, eyre::Report> {
    run_async(world.service.find_task(world.task_id()?))
        .wrap_err("load scenario task")?
        .ok_or_else(|| eyre!("scenario task disappeared from the repository"))
}

#[then(r#"the task status is "{state}""#)]
fn task_status_is(world: &TaskLifecycleWorld, state: String) -> Result<(), eyre::Report> {
    let expected = TaskState::try_from(state.as_str())
        .map_err(|err| eyre!("invalid expected state in scenario: {err}"))?;
    let task = stored_task(world)?;
    eyre::ensure!(
        task.state() == expected,
        "expected status {expected}, found {}",
        task.state()
    );
    Ok(())
}

#[then(r#"the task description is "{description}""#)]
fn task_description_is(
    world: &TaskLifecycleWorld,
    description: String,
) -> Result<(), eyre::Report> {
    let task = stored_task(world)?;
    eyre::ensure!(
        task.content().description() == description,
        "expected description {description:?}, found {:?}",
        task.content().description()
    );
    Ok(())
}

#[then("only the assignee has accepted")]
fn only_assignee_accepted(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let acceptance = *stored_task(world)?.acceptance();
    eyre::ensure!(acceptance.user, "assignee vote missing");
    eyre::ensure!(!acceptance.admin, "admin vote recorded unexpectedly");
    eyre::ensure!(acceptance.timestamp.is_none(), "acceptance finalized early");
    Ok(())
}

#[then("the acceptance is timestamped")]
fn acceptance_timestamped(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let acceptance = *stored_task(world)?.acceptance();
    eyre::ensure!(acceptance.is_complete(), "both votes should be recorded");
    eyre::ensure!(
        acceptance.timestamp.is_some(),
        "final acceptance should carry a timestamp"
    );
    Ok(())
}

#[then("no acceptance votes remain")]
fn no_votes_remain(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let acceptance = *stored_task(world)?.acceptance();
    eyre::ensure!(
        !acceptance.user && !acceptance.admin,
        "votes survived the reset: {acceptance:?}"
    );
    Ok(())
}

#[then(r#"the operation fails with "{kind}""#)]
fn operation_fails_with(world: &TaskLifecycleWorld, kind: String) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre!("expected the last operation to fail"))?;
    eyre::ensure!(
        err.kind().as_str() == kind,
        "expected a {kind} error, found {} ({err})",
        err.kind()
    );
    Ok(())
}
