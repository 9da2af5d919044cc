use super::{IMailTransport, TransportError};
use std::sync::Mutex;

/// One email captured by `InMemoryMailTransport`
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mail transport that records emails instead of delivering them.
/// Useful for testing. An error detail can be injected to exercise the
/// dispatch failure path.
pub struct InMemoryMailTransport {
    sent: Mutex<Vec<RecordedEmail>>,
    fail_with: Mutex<Option<String>>,
}

impl InMemoryMailTransport {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Mutex::new(None),
        }
    }

    /// Make every subsequent send fail with the given error detail
    pub fn fail_with(&self, error: &str) {
        *self.fail_with.lock().unwrap() = Some(error.to_string());
    }

    /// Let subsequent sends succeed again
    pub fn succeed(&self) {
        *self.fail_with.lock().unwrap() = None;
    }

    pub fn sent(&self) -> Vec<RecordedEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IMailTransport for InMemoryMailTransport {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), TransportError> {
        if let Some(error) = self.fail_with.lock().unwrap().clone() {
            return Err(TransportError::Delivery(error));
        }
        self.sent.lock().unwrap().push(RecordedEmail {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        });
        Ok(())
    }
}
