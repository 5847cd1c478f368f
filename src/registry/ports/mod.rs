//! Port contracts for the registry.

pub mod repository;

pub use repository::{RegistryRepository, RegistryRepositoryError, RegistryRepositoryResult};
