//! Notifier that records messages instead of sending them.

use crate::notification::{
    domain::{DeliveryError, EmailNotification},
    ports::Notifier,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Keeps every accepted message in memory.
///
/// Useful for dry runs and tests. A notifier built with
/// [`RecordingNotifier::failing`] refuses every message.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<EmailNotification>>>,
    failure: Option<String>,
}

impl RecordingNotifier {
    /// Creates a notifier that accepts every message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a notifier that refuses every message with `reason`.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent: Arc::default(),
            failure: Some(reason.into()),
        }
    }

    /// Returns the accepted messages in send order.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] if the message log lock is poisoned.
    pub fn sent(&self) -> Result<Vec<EmailNotification>, DeliveryError> {
        let guard = self
            .sent
            .lock()
            .map_err(|err| DeliveryError::new(err.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_email(&self, message: &EmailNotification) -> Result<(), DeliveryError> {
        if let Some(reason) = &self.failure {
            return Err(DeliveryError::new(reason.clone()));
        }
        let mut guard = self
            .sent
            .lock()
            .map_err(|err| DeliveryError::new(err.to_string()))?;
        guard.push(message.clone());
        Ok(())
    }
}
