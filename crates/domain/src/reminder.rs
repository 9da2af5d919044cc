use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Total number of delivery attempts allowed for one `Reminder`: the
/// initial attempt plus up to two retries.
pub const MAX_DELIVERY_ATTEMPTS: i64 = 3;

/// Backoff before retry number `retry_number` (1-based): 60s, 120s, 240s.
pub fn retry_delay(retry_number: i64) -> Duration {
    let exp = (retry_number - 1).max(0).min(30) as u32;
    Duration::from_secs(60 * 2u64.pow(exp))
}

/// Where a `Reminder` is in its delivery lifecycle. Only the dispatch
/// task moves a reminder out of `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Sent,
    Failed,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }
}

impl Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidStatusError {
    #[error("Reminder status: {0} is not recognized")]
    Unrecognized(String),
}

impl FromStr for ReminderStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            _ => Err(InvalidStatusError::Unrecognized(s.to_string())),
        }
    }
}

/// A scheduled email intention owned by a `User`. `retry_count` and
/// `last_retry` only ever change on a failed delivery attempt, and only
/// inside the dispatch task.
#[derive(Debug, Clone)]
pub struct Reminder {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub message: String,
    /// Timestamp in millis at which the reminder becomes due
    pub send_at: i64,
    pub status: ReminderStatus,
    pub retry_count: i64,
    /// Timestamp in millis of the last failed attempt, if any
    pub last_retry: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

impl Reminder {
    pub fn new(user_id: ID, title: &str, message: &str, send_at: i64, now: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            title: title.into(),
            message: message.into(),
            send_at,
            status: ReminderStatus::Pending,
            retry_count: 0,
            last_retry: None,
            created: now,
            updated: now,
        }
    }

    /// True once the reminder has used up all of its delivery attempts
    pub fn retries_exhausted(&self) -> bool {
        self.retry_count >= MAX_DELIVERY_ATTEMPTS
    }
}

impl Entity<ID> for Reminder {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_schedule_doubles() {
        assert_eq!(retry_delay(1), Duration::from_secs(60));
        assert_eq!(retry_delay(2), Duration::from_secs(120));
        assert_eq!(retry_delay(3), Duration::from_secs(240));
    }

    #[test]
    fn new_reminder_is_pending_with_clean_retry_state() {
        let reminder = Reminder::new(Default::default(), "Pay rent", "Rent is due", 1000, 500);
        assert_eq!(reminder.status, ReminderStatus::Pending);
        assert_eq!(reminder.retry_count, 0);
        assert!(reminder.last_retry.is_none());
        assert!(!reminder.retries_exhausted());
    }

    #[test]
    fn retries_exhausted_at_the_attempt_ceiling() {
        let mut reminder = Reminder::new(Default::default(), "Pay rent", "Rent is due", 1000, 500);
        reminder.retry_count = MAX_DELIVERY_ATTEMPTS - 1;
        assert!(!reminder.retries_exhausted());
        reminder.retry_count = MAX_DELIVERY_ATTEMPTS;
        assert!(reminder.retries_exhausted());
    }

    #[test]
    fn status_roundtrips_through_strings() {
        for status in &[
            ReminderStatus::Pending,
            ReminderStatus::Sent,
            ReminderStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<ReminderStatus>().unwrap(), *status);
        }
        assert!("done".parse::<ReminderStatus>().is_err());
    }
}
