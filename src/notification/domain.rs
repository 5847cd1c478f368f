//! Message and failure types for email delivery.

use serde::Serialize;
use thiserror::Error;

/// A single plain-text email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailNotification {
    /// Recipient address.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

impl EmailNotification {
    /// Creates a message.
    #[must_use]
    pub fn new(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Any failure to hand a message to the mail server.
///
/// Authentication, network and address problems all surface as this one
/// error; the reason is kept for display.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("email delivery failed: {reason}")]
pub struct DeliveryError {
    reason: String,
}

impl DeliveryError {
    /// Creates a delivery error with a human-readable reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Returns the reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
