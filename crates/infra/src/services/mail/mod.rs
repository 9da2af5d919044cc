mod inmemory;
mod smtp;

pub use inmemory::{InMemoryMailTransport, RecordedEmail};
pub use smtp::SmtpMailTransport;

use thiserror::Error;

/// Why a send attempt failed. The detail ends up on the `EmailLog`
/// entry recorded for the attempt.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Invalid mail address: {0}")]
    InvalidAddress(String),
    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}

/// Wraps the act of sending one email. Success or failure is the only
/// signal it returns; everything else (logging, retry bookkeeping) is
/// the dispatch task's business.
#[async_trait::async_trait]
pub trait IMailTransport: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), TransportError>;
}
