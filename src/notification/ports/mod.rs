//! Port contracts for notifications.

pub mod notifier;

pub use notifier::Notifier;
