//! Storage adapters for the registry and task ports.
//!
//! Both adapters implement [`RegistryRepository`] and [`TaskRepository`]
//! over one set of tables, because task references into the registry are
//! checked in the same write as the task insert.
//!
//! - [`memory::InMemoryStore`]: process-local tables behind one lock.
//! - [`sqlite::SqliteStore`]: Diesel over `SQLite` with table constraints.
//!
//! [`RegistryRepository`]: crate::registry::ports::RegistryRepository
//! [`TaskRepository`]: crate::task::ports::TaskRepository

pub mod memory;
pub mod sqlite;

#[cfg(test)]
mod tests;
