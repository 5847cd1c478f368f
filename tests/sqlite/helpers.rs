//! Shared helpers for `SQLite` integration tests.

use crate::test_helpers::Desk;
use taskdesk::storage::sqlite::{SqlitePool, SqliteStore, apply_schema, build_pool};

/// Services over a `SQLite` store.
pub type SqliteDesk = Desk<SqliteStore>;

/// Opens a fresh in-memory database with the schema applied.
///
/// # Errors
///
/// Returns an error if the pool cannot be built or the schema fails.
pub fn memory_pool() -> eyre::Result<SqlitePool> {
    let pool = build_pool(":memory:", 1)?;
    apply_schema(&pool)?;
    Ok(pool)
}

/// Wires services over a fresh in-memory database.
///
/// # Errors
///
/// Returns an error if the database cannot be prepared.
pub fn sqlite_desk() -> eyre::Result<SqliteDesk> {
    Ok(Desk::new(SqliteStore::new(memory_pool()?)))
}
