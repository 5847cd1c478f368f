//! Manual alerts and the pending task digest.

use crate::lookup::{LookupError, LookupKind, LookupResolver};
use crate::notification::{
    domain::{DeliveryError, EmailNotification},
    ports::Notifier,
};
use crate::registry::ports::RegistryRepository;
use crate::task::ports::TaskRepository;
use minijinja::Environment;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Subject line of the pending task digest.
pub const DIGEST_SUBJECT: &str = "Pending tasks";

const DIGEST_TEMPLATE: &str = "\
{% if tasks %}
Pending tasks ({{ tasks | length }}):
{% for task in tasks %}
- {{ task }}
{% endfor %}
{% else %}
No pending tasks.
{% endif %}";

/// Errors returned by notification services.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The mail server refused or could not be reached.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
    /// Pending tasks could not be loaded.
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// The digest template failed to render.
    #[error("digest rendering failed: {0}")]
    Template(String),
}

/// Sends alerts and digests through a [`Notifier`].
#[derive(Clone)]
pub struct NotificationService<N, R, T>
where
    N: Notifier,
    R: RegistryRepository,
    T: TaskRepository,
{
    notifier: Arc<N>,
    lookup: LookupResolver<R, T>,
}

impl<N, R, T> NotificationService<N, R, T>
where
    N: Notifier,
    R: RegistryRepository,
    T: TaskRepository,
{
    /// Creates a notification service.
    #[must_use]
    pub const fn new(notifier: Arc<N>, lookup: LookupResolver<R, T>) -> Self {
        Self { notifier, lookup }
    }

    /// Sends a free-form alert.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Delivery`] when sending fails.
    pub async fn send_alert(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError> {
        let message = EmailNotification::new(recipient.trim(), subject, body);
        self.deliver(&message).await
    }

    /// Sends one email listing every pending task by due date.
    ///
    /// An empty list still produces a message. Returns the number of tasks
    /// listed.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Lookup`] when tasks cannot be loaded,
    /// [`NotificationError::Template`] when rendering fails and
    /// [`NotificationError::Delivery`] when sending fails.
    pub async fn send_pending_digest(&self, recipient: &str) -> Result<usize, NotificationError> {
        let options = self.lookup.options(LookupKind::PendingTask).await?;
        let labels: Vec<&str> = options.iter().map(|option| option.label.as_str()).collect();
        let body = render_digest(&labels)?;

        let message = EmailNotification::new(
            recipient.trim(),
            format!("{DIGEST_SUBJECT} ({})", labels.len()),
            body,
        );
        self.deliver(&message).await?;
        Ok(labels.len())
    }

    async fn deliver(&self, message: &EmailNotification) -> Result<(), NotificationError> {
        self.notifier.send_email(message).await.inspect_err(|err| {
            warn!(recipient = %message.recipient, error = %err, "email not delivered");
        })?;
        info!(recipient = %message.recipient, subject = %message.subject, "email sent");
        Ok(())
    }
}

fn render_digest(labels: &[&str]) -> Result<String, NotificationError> {
    let mut environment = Environment::new();
    environment.set_trim_blocks(true);
    environment
        .render_str(DIGEST_TEMPLATE, json!({ "tasks": labels }))
        .map_err(|err| NotificationError::Template(err.to_string()))
}
