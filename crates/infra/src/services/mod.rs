mod mail;

pub use mail::{
    IMailTransport, InMemoryMailTransport, RecordedEmail, SmtpMailTransport, TransportError,
};
