//! Email notifications.
//!
//! The [`ports::Notifier`] port sends exactly one message per call with no
//! retry and no queue. Two adapters implement it:
//!
//! - [`adapters::smtp::SmtpNotifier`] submits over STARTTLS with credentials
//!   taken from [`SmtpConfig`](crate::config::SmtpConfig).
//! - [`adapters::memory::RecordingNotifier`] keeps messages in memory.
//!
//! [`services::NotificationService`] sends manual alerts and the pending
//! task digest.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
