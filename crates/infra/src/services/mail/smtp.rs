use super::{IMailTransport, TransportError};
use crate::config::Config;

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

/// SMTP implementation of `IMailTransport` on top of `lettre`, using
/// STARTTLS towards the configured relay.
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailTransport {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let smtp = &config.smtp;
        let from = smtp
            .from_address
            .parse::<Mailbox>()
            .map_err(|e| anyhow::anyhow!("Invalid EMAIL_FROM address {}: {}", smtp.from_address, e))?;

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)?.port(smtp.port);
        if let (Some(username), Some(password)) = (smtp.username.clone(), smtp.password.clone()) {
            builder = builder.credentials(Credentials::new(username, password));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait::async_trait]
impl IMailTransport for SmtpMailTransport {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), TransportError> {
        let to = to
            .parse::<Mailbox>()
            .map_err(|e| TransportError::InvalidAddress(format!("{}: {}", to, e)))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| TransportError::Delivery(format!("Failed to build email: {}", e)))?;

        debug!("Sending email via {}", self.from);
        self.transport
            .send(email)
            .await
            .map(|_| ())
            .map_err(|e| TransportError::Delivery(e.to_string()))
    }
}
