//! Outbound email port.

use crate::notification::domain::{DeliveryError, EmailNotification};
use async_trait::async_trait;

/// Sends email notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one message and waits for the server to accept or refuse it.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] for any failure. Nothing is retried.
    async fn send_email(&self, message: &EmailNotification) -> Result<(), DeliveryError>;
}
