//! Repository port for task persistence and queries.

use crate::task::domain::{NewTask, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns it under its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DanglingReference`] when the branch or
    /// subcategory reference does not resolve. Nothing is written.
    async fn insert(&self, draft: &NewTask) -> TaskRepositoryResult<Task>;

    /// Persists the status and completion timestamp of `task`, provided the
    /// stored status still equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// or [`TaskRepositoryError::StatusConflict`] when another writer changed
    /// the status first.
    async fn update_status(&self, task: &Task, expected: TaskStatus) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task in identifier order.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns pending tasks ordered by due date, then identifier.
    async fn list_pending(&self) -> TaskRepositoryResult<Vec<Task>>;
}

/// Foreign-key columns of the task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskReference {
    /// `branch_id` column.
    Branch,
    /// `subcategory_id` column.
    Subcategory,
}

impl TaskReference {
    /// Returns the column name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Branch => "branch_id",
            Self::Subcategory => "subcategory_id",
        }
    }
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A referenced row does not exist.
    #[error("task {} references missing row {id}", field.as_str())]
    DanglingReference {
        /// Offending reference column.
        field: TaskReference,
        /// Identifier that failed to resolve.
        id: i64,
    },

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored status no longer matches what the caller read.
    #[error("task {task_id} is no longer {}", expected.as_str())]
    StatusConflict {
        /// Task that was being updated.
        task_id: TaskId,
        /// Status the caller expected to replace.
        expected: TaskStatus,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
