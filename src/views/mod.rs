//! Read-only projections of a task collection.
//!
//! Views work over anything implementing [`BoardCard`] (Kanban grouping,
//! date slices, charts and board reassignment) or [`Projectable`] (the
//! calendar, timeline and spreadsheet field projections). Both the stored
//! [`Task`](crate::task::domain::Task) and the session board's
//! [`SimpleTask`](crate::board::SimpleTask) implement them.
//!
//! Nothing here mutates tasks. Reassignment produces a plan of
//! [`StatusChange`]s that the owning store applies.

mod card;
mod grouping;
mod projection;
mod reassignment;

pub use card::BoardCard;
pub use grouping::{due_within, group_by_status, status_counts};
pub use projection::{
    FieldValue, ProjectedRecord, Projectable, TaskField, ViewPreset, project,
};
pub use reassignment::{
    BoardError, StatusChange, plan_reassignment_by_id, plan_reassignment_by_title,
};

#[cfg(test)]
mod tests;
