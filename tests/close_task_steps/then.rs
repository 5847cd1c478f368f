//! Then steps for close-task BDD scenarios.

use super::world::{CloseFailure, CloseTaskWorld, run_async};
use rstest_bdd_macros::then;
use taskdesk::lookup::LookupError;
use taskdesk::task::{
    domain::{TaskDomainError, TaskStatus},
    services::TaskLifecycleError,
};

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &CloseTaskWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task_id = world.filed_task()?.id();

    let stored = run_async(world.tasks.find_task(task_id))?
        .ok_or_else(|| eyre::eyre!("task {task_id} is not stored"))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            stored.status().as_str()
        ));
    }
    Ok(())
}

#[then("the task has a completion time")]
fn task_has_completion_time(world: &CloseTaskWorld) -> Result<(), eyre::Report> {
    let task = world.filed_task()?;
    eyre::ensure!(task.completed_at().is_some(), "completion time not recorded");
    eyre::ensure!(
        task.completed_at() >= Some(task.created_at()),
        "completion precedes creation"
    );
    Ok(())
}

#[then("no pending tasks remain")]
fn no_pending_tasks(world: &CloseTaskWorld) -> Result<(), eyre::Report> {
    let pending = run_async(world.tasks.list_pending())?;
    eyre::ensure!(pending.is_empty(), "{} tasks still pending", pending.len());
    Ok(())
}

#[then("closing fails with an invalid transition error")]
fn close_was_invalid(world: &CloseTaskWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_close
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing close result"))?;

    if !matches!(
        result,
        Err(CloseFailure::Lifecycle(TaskLifecycleError::Domain(
            TaskDomainError::InvalidTransition { .. }
        )))
    ) {
        return Err(eyre::eyre!("expected InvalidTransition error, got {result:?}"));
    }
    Ok(())
}

#[then("the label is not found")]
fn label_not_found(world: &CloseTaskWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_close
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing close result"))?;

    if !matches!(
        result,
        Err(CloseFailure::Lookup(LookupError::NotFound { .. }))
    ) {
        return Err(eyre::eyre!("expected NotFound error, got {result:?}"));
    }
    Ok(())
}
