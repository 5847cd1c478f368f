//! Service layer for task creation, closing and pending-work queries.

use crate::registry::domain::{BranchId, SubcategoryId};
use crate::task::{
    domain::{NewTask, Task, TaskDomainError, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    due_date: NaiveDate,
    branch_id: Option<BranchId>,
    subcategory_id: Option<SubcategoryId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            due_date,
            branch_id: None,
            subcategory_id: None,
        }
    }

    /// Sets the owning branch.
    #[must_use]
    pub const fn with_branch(mut self, branch_id: BranchId) -> Self {
        self.branch_id = Some(branch_id);
        self
    }

    /// Sets the subcategory.
    #[must_use]
    pub const fn with_subcategory(mut self, subcategory_id: SubcategoryId) -> Self {
        self.subcategory_id = Some(subcategory_id);
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain rule rejected the operation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when a reference does not
    /// resolve or persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            title,
            due_date,
            branch_id,
            subcategory_id,
        } = request;

        let mut draft = NewTask::new(title, due_date, &*self.clock);
        if let Some(branch) = branch_id {
            draft = draft.with_branch(branch);
        }
        if let Some(subcategory) = subcategory_id {
            draft = draft.with_subcategory(subcategory);
        }

        let task = self.repository.insert(&draft).await.inspect_err(|err| {
            warn!(title = %draft.title, error = %err, "task creation rejected");
        })?;
        info!(task_id = %task.id(), due_date = %task.due_date(), "task created");
        Ok(task)
    }

    /// Marks a task as done and records its completion time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// and [`TaskLifecycleError::Domain`] when it is already done, including
    /// when a concurrent close commits first.
    pub async fn close_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))?;

        let previous = task.status();
        task.close(&*self.clock).inspect_err(|err| {
            warn!(%task_id, error = %err, "task close rejected");
        })?;
        match self.repository.update_status(&task, previous).await {
            Ok(()) => {}
            Err(TaskRepositoryError::StatusConflict { .. }) => {
                return Err(self.lost_close(task_id).await);
            }
            Err(err) => return Err(err.into()),
        }
        info!(%task_id, "task closed");
        Ok(task)
    }

    /// Reports a close that another writer beat to the stored row.
    async fn lost_close(&self, task_id: TaskId) -> TaskLifecycleError {
        let current = match self.repository.find_by_id(task_id).await {
            Ok(Some(stored)) => stored.status(),
            Ok(None) => return TaskLifecycleError::NotFound(task_id),
            Err(err) => return err.into(),
        };
        warn!(%task_id, status = %current, "task closed concurrently");
        TaskDomainError::InvalidTransition {
            task_id,
            from: current,
            to: TaskStatus::Done,
        }
        .into()
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn find_task(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Lists pending tasks by due date, ties broken by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the query fails.
    pub async fn list_pending(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list_pending().await?)
    }

    /// Lists every task in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the query fails.
    pub async fn list_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list_all().await?)
    }
}
