//! Views built from stored tasks.

use super::helpers::{MemoryDesk, desk};
use crate::test_helpers::date;
use rstest::rstest;
use std::collections::BTreeMap;
use taskdesk::task::{
    domain::{Task, TaskStatus},
    services::CreateTaskRequest,
};
use taskdesk::views::{
    FieldValue, TaskField, ViewPreset, due_within, group_by_status, plan_reassignment_by_id,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_columns_follow_stored_statuses(desk: MemoryDesk) -> eyre::Result<()> {
    let open = desk
        .tasks
        .create_task(CreateTaskRequest::new("File ICMS", date(2024, 5, 10)?))
        .await?;
    let closed = desk
        .tasks
        .create_task(CreateTaskRequest::new("Payroll", date(2024, 5, 5)?))
        .await?;
    desk.tasks.close_task(closed.id()).await?;
    let tasks = desk.tasks.list_tasks().await?;

    let columns = group_by_status(&tasks);

    let pending: Vec<_> = columns
        .get(&TaskStatus::Pending)
        .map(|cards| cards.iter().map(|task| task.id()).collect())
        .unwrap_or_default();
    let done: Vec<_> = columns
        .get(&TaskStatus::Done)
        .map(|cards| cards.iter().map(|task| task.id()).collect())
        .unwrap_or_default();
    eyre::ensure!(pending == vec![open.id()], "pending column was {pending:?}");
    eyre::ensure!(done == vec![closed.id()], "done column was {done:?}");
    eyre::ensure!(
        columns
            .get(&TaskStatus::InProgress)
            .is_some_and(Vec::is_empty),
        "in-progress column missing"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn calendar_preset_keeps_only_its_fields(desk: MemoryDesk) -> eyre::Result<()> {
    desk.tasks
        .create_task(CreateTaskRequest::new("File ICMS", date(2024, 5, 10)?))
        .await?;
    let tasks = desk.tasks.list_tasks().await?;

    let records = ViewPreset::Calendar.project(&tasks);

    let record = records
        .first()
        .ok_or_else(|| eyre::eyre!("no projected record"))?;
    let names: Vec<_> = record.fields().iter().map(|(field, _)| *field).collect();
    eyre::ensure!(
        names == ViewPreset::Calendar.fields::<Task>(),
        "unexpected fields {names:?}"
    );
    eyre::ensure!(
        record.get(TaskField::Title) == Some(&FieldValue::Text("File ICMS".to_owned())),
        "title not projected"
    );
    eyre::ensure!(record.get(TaskField::Branch).is_none(), "branch leaked into calendar");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn due_window_and_reassignment_plan(desk: MemoryDesk) -> eyre::Result<()> {
    let may = desk
        .tasks
        .create_task(CreateTaskRequest::new("File ICMS", date(2024, 5, 10)?))
        .await?;
    desk.tasks
        .create_task(CreateTaskRequest::new("Annual report", date(2024, 12, 31)?))
        .await?;
    let tasks = desk.tasks.list_tasks().await?;

    let window = date(2024, 5, 1)?..=date(2024, 5, 31)?;
    let in_may: Vec<_> = due_within(&tasks, &window)
        .into_iter()
        .map(|task| task.id())
        .collect();
    eyre::ensure!(in_may == vec![may.id()], "window held {in_may:?}");

    let arrangement = BTreeMap::from([(TaskStatus::InProgress, vec![may.id()])]);
    let plan = plan_reassignment_by_id(&tasks, &arrangement)?;
    let [change] = plan.as_slice() else {
        eyre::bail!("expected one change, got {}", plan.len());
    };
    eyre::ensure!(change.id == may.id(), "planned the wrong task");
    eyre::ensure!(change.status == TaskStatus::InProgress, "planned the wrong status");
    Ok(())
}
