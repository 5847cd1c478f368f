//! Task record and lifecycle status.

use super::{ParseTaskStatusError, TaskDomainError, TaskId};
use crate::registry::domain::{BranchId, SubcategoryId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// Variants are declared in board order so that `Ord` sorts columns as
/// pending, in progress, done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    Pending,
    /// Work is under way.
    InProgress,
    /// Work is finished.
    Done,
}

impl TaskStatus {
    /// Every status in board order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Done];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Returns `true` when no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns whether moving from `self` to `target` is a forward move.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::InProgress | Self::Done) | (Self::InProgress, Self::Done)
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

/// Draft of a task that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: String,
    /// Date the task falls due.
    pub due_date: NaiveDate,
    /// Branch the task belongs to, if any.
    pub branch_id: Option<BranchId>,
    /// Subcategory the task is filed under, if any.
    pub subcategory_id: Option<SubcategoryId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a draft stamped with the current clock time.
    #[must_use]
    pub fn new(title: impl Into<String>, due_date: NaiveDate, clock: &impl Clock) -> Self {
        Self {
            title: title.into(),
            due_date,
            branch_id: None,
            subcategory_id: None,
            created_at: clock.utc(),
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

/// Task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    due_date: NaiveDate,
    branch_id: Option<BranchId>,
    subcategory_id: Option<SubcategoryId>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted due date.
    pub due_date: NaiveDate,
    /// Persisted branch reference, if any.
    pub branch_id: Option<BranchId>,
    /// Persisted subcategory reference, if any.
    pub subcategory_id: Option<SubcategoryId>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Materializes a freshly stored draft under its assigned identifier.
    #[must_use]
    pub fn from_new(id: TaskId, draft: NewTask) -> Self {
        Self {
            id,
            title: draft.title,
            due_date: draft.due_date,
            branch_id: draft.branch_id,
            subcategory_id: draft.subcategory_id,
            status: TaskStatus::Pending,
            created_at: draft.created_at,
            completed_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            due_date: data.due_date,
            branch_id: data.branch_id,
            subcategory_id: data.subcategory_id,
            status: data.status,
            created_at: data.created_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Returns the owning branch, if any.
    #[must_use]
    pub const fn branch_id(&self) -> Option<BranchId> {
        self.branch_id
    }

    /// Returns the subcategory, if any.
    #[must_use]
    pub const fn subcategory_id(&self) -> Option<SubcategoryId> {
        self.subcategory_id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp once the task is done.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Moves the task forward to `target`.
    ///
    /// Reaching [`TaskStatus::Done`] records the completion timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the move is not
    /// forward. The task is left unchanged.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        if target == TaskStatus::Done {
            self.completed_at = Some(clock.utc());
        }
        Ok(())
    }

    /// Closes the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] if the task is
    /// already done.
    pub fn close(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.transition_to(TaskStatus::Done, clock)
    }
}
