//! Domain model for task lifecycle management.
//!
//! Tasks are created `pending`, only move forward, and record a completion
//! timestamp when they reach `done`. Storage concerns stay outside this
//! module.

mod error;
mod ids;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use task::{NewTask, PersistedTaskData, Task, TaskStatus};
