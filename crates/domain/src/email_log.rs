use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Outcome recorded for a single send attempt. `Retry` marks an attempt
/// that has been handed back to the scheduler and is still in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Success,
    Failed,
    Retry,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Retry => "retry",
        }
    }
}

impl Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidDeliveryStatusError {
    #[error("Delivery status: {0} is not recognized")]
    Unrecognized(String),
}

impl FromStr for DeliveryStatus {
    type Err = InvalidDeliveryStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            "retry" => Ok(Self::Retry),
            _ => Err(InvalidDeliveryStatusError::Unrecognized(s.to_string())),
        }
    }
}

/// Append-only record of one send attempt. Entries are never mutated
/// by the dispatch path; the retention sweep is the only thing that
/// removes them.
#[derive(Debug, Clone)]
pub struct EmailLog {
    pub id: ID,
    /// The `Reminder` that triggered the attempt. Birthday greetings
    /// and other reminder-less sends leave this empty.
    pub reminder_id: Option<ID>,
    pub to_email: String,
    pub subject: String,
    pub body: String,
    pub status: DeliveryStatus,
    /// Present iff the attempt failed
    pub error: Option<String>,
    /// Timestamp in millis, set at creation
    pub sent_at: i64,
}

impl EmailLog {
    pub fn success(
        reminder_id: Option<ID>,
        to_email: &str,
        subject: &str,
        body: &str,
        sent_at: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            reminder_id,
            to_email: to_email.into(),
            subject: subject.into(),
            body: body.into(),
            status: DeliveryStatus::Success,
            error: None,
            sent_at,
        }
    }

    pub fn failed(
        reminder_id: Option<ID>,
        to_email: &str,
        subject: &str,
        body: &str,
        error: String,
        sent_at: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            reminder_id,
            to_email: to_email.into(),
            subject: subject.into(),
            body: body.into(),
            status: DeliveryStatus::Failed,
            error: Some(error),
            sent_at,
        }
    }
}

impl Entity<ID> for EmailLog {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_entry_carries_no_error() {
        let log = EmailLog::success(None, "lisa@example.com", "Hello", "Hi there", 100);
        assert_eq!(log.status, DeliveryStatus::Success);
        assert!(log.error.is_none());
        assert!(log.reminder_id.is_none());
    }

    #[test]
    fn failed_entry_captures_the_error_detail() {
        let reminder_id = ID::new();
        let log = EmailLog::failed(
            Some(reminder_id.clone()),
            "lisa@example.com",
            "Hello",
            "Hi there",
            "550 mailbox unavailable".into(),
            100,
        );
        assert_eq!(log.status, DeliveryStatus::Failed);
        assert_eq!(log.error.as_deref(), Some("550 mailbox unavailable"));
        assert_eq!(log.reminder_id, Some(reminder_id));
    }
}
