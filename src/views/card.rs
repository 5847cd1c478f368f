//! The view of a task that boards and charts need.

use crate::task::domain::{Task, TaskId, TaskStatus};
use chrono::NaiveDate;

/// A task as shown on a board.
pub trait BoardCard {
    /// Identifier used by id-based reassignment.
    type Id: Copy + Ord + Into<i64>;

    /// Returns the card identifier.
    fn card_id(&self) -> Self::Id;

    /// Returns the card title.
    fn title(&self) -> &str;

    /// Returns the column the card sits in.
    fn status(&self) -> TaskStatus;

    /// Returns the due date.
    fn due_date(&self) -> NaiveDate;
}

impl BoardCard for Task {
    type Id = TaskId;

    fn card_id(&self) -> TaskId {
        self.id()
    }

    fn title(&self) -> &str {
        Self::title(self)
    }

    fn status(&self) -> TaskStatus {
        Self::status(self)
    }

    fn due_date(&self) -> NaiveDate {
        Self::due_date(self)
    }
}
