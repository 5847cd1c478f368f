//! SMTP notifier backed by `lettre`.

use crate::config::SmtpConfig;
use crate::notification::{
    domain::{DeliveryError, EmailNotification},
    ports::Notifier,
};
use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Submits messages to an SMTP relay over STARTTLS.
#[derive(Clone)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    /// Builds a notifier from configuration.
    ///
    /// No connection is opened until the first message is sent.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] when the sender address is malformed or
    /// the relay host cannot be used for TLS.
    pub fn new(config: &SmtpConfig) -> Result<Self, DeliveryError> {
        let from = parse_mailbox("sender", &config.from)?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|err| DeliveryError::new(format!("relay {}: {err}", config.host)))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(config.timeout)
            .build();
        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_email(&self, message: &EmailNotification) -> Result<(), DeliveryError> {
        let to = parse_mailbox("recipient", &message.recipient)?;
        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|err| DeliveryError::new(format!("failed to build message: {err}")))?;

        self.transport
            .send(email)
            .await
            .map(|_| ())
            .map_err(|err| DeliveryError::new(err.to_string()))
    }
}

fn parse_mailbox(role: &str, address: &str) -> Result<Mailbox, DeliveryError> {
    address
        .trim()
        .parse()
        .map_err(|err| DeliveryError::new(format!("invalid {role} address \"{address}\": {err}")))
}
