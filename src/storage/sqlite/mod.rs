//! `SQLite` adapter for the registry and task ports.
//!
//! Diesel calls run on the blocking thread pool. Every write executes in an
//! `IMMEDIATE` transaction, so the existence and uniqueness pre-checks and
//! the insert they guard observe the same database state. Table constraints
//! stay in place as the final authority.

mod models;
mod registry;
mod schema;
mod task;

use crate::registry::ports::RegistryRepositoryError;
use crate::task::ports::TaskRepositoryError;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError};
use diesel::result::Error as DieselError;
use diesel::sqlite::SqliteConnection;
use thiserror::Error;

/// SQL creating the store's tables.
pub const SCHEMA_SQL: &str =
    include_str!("../../../migrations/2024-05-01-000000_create_registry_tables/up.sql");

/// `SQLite` connection pool type used by the store.
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum StorageSetupError {
    /// The pool could not be built or a connection could not be checked out.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    /// A setup statement failed.
    #[error("schema error: {0}")]
    Query(#[from] DieselError),
}

/// Per-connection settings applied when a connection is checked out.
#[derive(Debug, Clone, Copy)]
struct ConnectionPragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Returns `true` when `database_url` names an in-memory database.
#[must_use]
pub fn is_in_memory(database_url: &str) -> bool {
    database_url == ":memory:" || database_url.contains("mode=memory")
}

/// Builds a connection pool for `database_url`.
///
/// An in-memory database lives and dies with its single connection, so the
/// pool is pinned to one connection that is never recycled.
///
/// # Errors
///
/// Returns [`StorageSetupError::Pool`] when the first connection cannot be
/// opened.
pub fn build_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, StorageSetupError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let base = Pool::<ConnectionManager<SqliteConnection>>::builder()
        .connection_customizer(Box::new(ConnectionPragmas));
    let configured = if is_in_memory(database_url) {
        base.max_size(1).idle_timeout(None).max_lifetime(None)
    } else {
        base.max_size(max_connections.max(1))
    };
    Ok(configured.build(manager)?)
}

/// Creates the store's tables.
///
/// Intended for fresh databases; running it twice fails on the existing
/// tables.
///
/// # Errors
///
/// Returns [`StorageSetupError`] when no connection is available or a
/// statement fails.
pub fn apply_schema(pool: &SqlitePool) -> Result<(), StorageSetupError> {
    let mut connection = pool.get()?;
    connection.batch_execute(SCHEMA_SQL)?;
    Ok(())
}

/// `SQLite`-backed store implementing both repository ports.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a store over an existing pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: FromPersistence + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(E::from_persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(E::from_persistence)?
    }
}

/// Repository errors that can wrap an opaque storage failure.
trait FromPersistence: Sized {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

impl FromPersistence for RegistryRepositoryError {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl FromPersistence for TaskRepositoryError {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

// Needed by `immediate_transaction`, which rolls back on any `Err`.
impl From<DieselError> for RegistryRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}
