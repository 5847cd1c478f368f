//! Session task board.
//!
//! A [`SessionBoard`] is an owned, in-memory list of [`SimpleTask`]s that
//! lives exactly as long as the interactive session holding it. Unlike the
//! stored tasks, board cards carry free-text assignees, a hierarchy level
//! and a competence month, and their status can be overwritten freely.

mod domain;
mod session;

pub use domain::{
    CompetenceMonth, NewSimpleTask, ParseCompetenceError, ParseTaskLevelError, SimpleTask,
    SimpleTaskId, TaskLevel,
};
pub use session::{SessionBoard, SessionBoardError};

#[cfg(test)]
mod tests;
