//! Task repository over `SQLite`.

use super::{
    SqliteStore,
    models::{NewTaskRow, TaskRow},
    schema::{branches, subcategories, tasks},
};
use crate::task::{
    domain::{NewTask, Task, TaskId, TaskStatus},
    ports::{TaskReference, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

#[async_trait]
impl TaskRepository for SqliteStore {
    async fn insert(&self, draft: &NewTask) -> TaskRepositoryResult<Task> {
        let task = draft.clone();
        self.run_blocking(move |connection| {
            connection.immediate_transaction(|conn| {
                ensure_references(conn, &task)?;

                let id = diesel::insert_into(tasks::table)
                    .values(NewTaskRow {
                        title: &task.title,
                        due_date: task.due_date,
                        branch_id: task.branch_id.map(|id| id.value()),
                        subcategory_id: task.subcategory_id.map(|id| id.value()),
                        status: TaskStatus::Pending.as_str(),
                        created_at: task.created_at.naive_utc(),
                    })
                    .returning(tasks::id)
                    .get_result::<i64>(conn)?;

                Ok(Task::from_new(TaskId::new(id), task.clone()))
            })
        })
        .await
    }

    async fn update_status(&self, task: &Task, expected: TaskStatus) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let status = task.status().as_str();
        let completed_at = task.completed_at().map(|at| at.naive_utc());

        self.run_blocking(move |connection| {
            connection.immediate_transaction(|conn| {
                let updated = diesel::update(
                    tasks::table
                        .filter(tasks::id.eq(task_id.value()))
                        .filter(tasks::status.eq(expected.as_str())),
                )
                .set((
                    tasks::status.eq(status),
                    tasks::completed_at.eq(completed_at),
                ))
                .execute(conn)?;
                if updated > 0 {
                    return Ok(());
                }

                let exists = tasks::table
                    .find(task_id.value())
                    .select(tasks::id)
                    .first::<i64>(conn)
                    .optional()?
                    .is_some();
                if exists {
                    Err(TaskRepositoryError::StatusConflict { task_id, expected })
                } else {
                    Err(TaskRepositoryError::NotFound(task_id))
                }
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |conn| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(conn)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|conn| {
            let rows = tasks::table
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(conn)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_pending(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|conn| {
            let rows = tasks::table
                .filter(tasks::status.eq(TaskStatus::Pending.as_str()))
                .order((tasks::due_date.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(conn)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    Task::try_from(row).map_err(TaskRepositoryError::persistence)
}

fn ensure_references(conn: &mut SqliteConnection, task: &NewTask) -> TaskRepositoryResult<()> {
    if let Some(branch_id) = task.branch_id {
        let found = branches::table
            .find(branch_id.value())
            .select(branches::id)
            .first::<i64>(conn)
            .optional()?;
        if found.is_none() {
            return Err(TaskRepositoryError::DanglingReference {
                field: TaskReference::Branch,
                id: branch_id.value(),
            });
        }
    }
    if let Some(subcategory_id) = task.subcategory_id {
        let found = subcategories::table
            .find(subcategory_id.value())
            .select(subcategories::id)
            .first::<i64>(conn)
            .optional()?;
        if found.is_none() {
            return Err(TaskRepositoryError::DanglingReference {
                field: TaskReference::Subcategory,
                id: subcategory_id.value(),
            });
        }
    }
    Ok(())
}
