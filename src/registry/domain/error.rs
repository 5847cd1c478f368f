//! Error types for registry parsing.

use thiserror::Error;

/// Error returned while parsing a subcategory periodicity.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown periodicity: {0}")]
pub struct ParsePeriodicityError(pub String);
