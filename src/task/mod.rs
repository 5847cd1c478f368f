//! Task lifecycle management.
//!
//! Tasks are filed against a branch and subcategory from the
//! [`registry`](crate::registry), start out pending and are closed once.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]
//!
//! Adapters implementing [`ports::TaskRepository`] live in
//! [`storage`](crate::storage) because they share state with the registry.

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
