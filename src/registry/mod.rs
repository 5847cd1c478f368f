//! Registry of companies, branches, categories, subcategories and users.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Registration services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
