//! Crate-level error aggregating every bounded context.
//!
//! Library operations return their own context errors; [`AppError`] exists
//! for callers such as the command-line tool that drive several contexts
//! and render one message per failure.

use crate::board::SessionBoardError;
use crate::config::ConfigError;
use crate::lookup::LookupError;
use crate::notification::{domain::DeliveryError, services::NotificationError};
use crate::registry::ports::RegistryRepositoryError;
use crate::storage::sqlite::StorageSetupError;
use crate::task::services::TaskLifecycleError;
use thiserror::Error;

/// Any failure surfaced to an application caller.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The database could not be opened or prepared.
    #[error(transparent)]
    Storage(#[from] StorageSetupError),
    /// A registry write or query failed.
    #[error(transparent)]
    Registry(#[from] RegistryRepositoryError),
    /// A task operation failed.
    #[error(transparent)]
    Task(#[from] TaskLifecycleError),
    /// A label could not be resolved.
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// A session board operation failed.
    #[error(transparent)]
    Board(#[from] SessionBoardError),
    /// A notification could not be sent.
    #[error(transparent)]
    Notification(#[from] NotificationError),
    /// The mail transport could not be set up.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
    /// The request cannot be served with the current setup.
    #[error("{0}")]
    Unavailable(String),
}

/// Result type for application-level operations.
pub type AppResult<T> = Result<T, AppError>;
