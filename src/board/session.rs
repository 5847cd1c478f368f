//! The owned session board.

use super::domain::{NewSimpleTask, SimpleTask, SimpleTaskId};
use crate::task::domain::TaskStatus;
use crate::views::{BoardError, StatusChange, plan_reassignment_by_id, plan_reassignment_by_title};
use mockable::Clock;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Errors returned by session board operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionBoardError {
    /// No card sits at the given position.
    #[error("no card at position {0}")]
    UnknownTask(SimpleTaskId),
    /// The board cannot number another card.
    #[error("the board is full")]
    Full,
    /// A rearranged board was rejected.
    #[error(transparent)]
    Reassignment(#[from] BoardError),
}

/// In-memory board owned by one session.
///
/// Cards are numbered by insertion position and the numbering restarts
/// after [`SessionBoard::clear`].
#[derive(Debug)]
pub struct SessionBoard<C: Clock> {
    clock: C,
    tasks: Vec<SimpleTask>,
}

impl<C: Clock> SessionBoard<C> {
    /// Creates an empty board.
    #[must_use]
    pub const fn new(clock: C) -> Self {
        Self {
            clock,
            tasks: Vec::new(),
        }
    }

    /// Adds a card at the next position, in the column the draft names.
    ///
    /// # Errors
    ///
    /// Returns [`SessionBoardError::Full`] once positions run out.
    pub fn add_task(&mut self, draft: NewSimpleTask) -> Result<SimpleTask, SessionBoardError> {
        let position = self
            .tasks
            .len()
            .checked_add(1)
            .and_then(|next| u32::try_from(next).ok())
            .ok_or(SessionBoardError::Full)?;
        let task = SimpleTask::from_draft(SimpleTaskId::new(position), draft, self.clock.utc());
        debug!(task_id = %task.id(), status = %task.status(), "card added");
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Returns every card in position order.
    #[must_use]
    pub fn tasks(&self) -> &[SimpleTask] {
        &self.tasks
    }

    /// Returns the card at `id`.
    #[must_use]
    pub fn get(&self, id: SimpleTaskId) -> Option<&SimpleTask> {
        let index = usize::try_from(id.value()).ok()?.checked_sub(1)?;
        self.tasks.get(index)
    }

    /// Overwrites a card's column. Any column may follow any other.
    ///
    /// # Errors
    ///
    /// Returns [`SessionBoardError::UnknownTask`] when no card sits at `id`.
    pub fn set_status(
        &mut self,
        id: SimpleTaskId,
        status: TaskStatus,
    ) -> Result<(), SessionBoardError> {
        let task = self
            .task_mut(id)
            .ok_or(SessionBoardError::UnknownTask(id))?;
        task.set_status(status);
        Ok(())
    }

    /// Applies a rearranged board given as column titles.
    ///
    /// Every card sharing a listed title moves to that column. Returns the
    /// number of cards that changed column.
    ///
    /// # Errors
    ///
    /// Returns [`SessionBoardError::Reassignment`] when a title is listed
    /// under two columns; no card moves in that case.
    pub fn reassign_by_titles(
        &mut self,
        columns: &BTreeMap<TaskStatus, Vec<String>>,
    ) -> Result<usize, SessionBoardError> {
        let plan = plan_reassignment_by_title(&self.tasks, columns)?;
        Ok(self.apply(&plan))
    }

    /// Applies a rearranged board given as column card ids.
    ///
    /// # Errors
    ///
    /// Returns [`SessionBoardError::Reassignment`] for an unknown id or an
    /// id listed under two columns; no card moves in that case.
    pub fn reassign_by_ids(
        &mut self,
        columns: &BTreeMap<TaskStatus, Vec<SimpleTaskId>>,
    ) -> Result<usize, SessionBoardError> {
        let plan = plan_reassignment_by_id(&self.tasks, columns)?;
        Ok(self.apply(&plan))
    }

    /// Drops every card, as a session restart does.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the board has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn task_mut(&mut self, id: SimpleTaskId) -> Option<&mut SimpleTask> {
        let index = usize::try_from(id.value()).ok()?.checked_sub(1)?;
        self.tasks.get_mut(index)
    }

    fn apply(&mut self, plan: &[StatusChange<SimpleTaskId>]) -> usize {
        let mut moved = 0;
        for change in plan {
            if let Some(task) = self.task_mut(change.id) {
                task.set_status(change.status);
                moved += 1;
            }
        }
        debug!(moved, "board rearranged");
        moved
    }
}
