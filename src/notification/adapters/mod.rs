//! Notifier adapters.

pub mod memory;
pub mod smtp;
