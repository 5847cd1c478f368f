//! When steps for close-task BDD scenarios.

use super::world::{CloseFailure, CloseTaskWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"the pending task "{label}" is closed"#)]
fn close_by_label(world: &mut CloseTaskWorld, label: String) {
    let result = run_async(async {
        let task_id = world
            .lookup
            .resolve_pending_task(&label)
            .await
            .map_err(CloseFailure::Lookup)?;
        world
            .tasks
            .close_task(task_id)
            .await
            .map_err(CloseFailure::Lifecycle)
    });
    if let Ok(ref closed) = result {
        world.task = Some(closed.clone());
    }
    world.last_close = Some(result);
}

#[when("the task is closed again")]
fn close_again(world: &mut CloseTaskWorld) -> Result<(), eyre::Report> {
    let task_id = world.filed_task()?.id();
    let result =
        run_async(world.tasks.close_task(task_id)).map_err(CloseFailure::Lifecycle);
    world.last_close = Some(result);
    Ok(())
}
