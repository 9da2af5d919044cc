use crate::shared::entity::ID;
use std::time::Duration;

/// Payload for one email delivery attempt, executed by the dispatch
/// worker. Retries re-enqueue the same job unchanged; the attempt
/// bookkeeping lives on the linked `Reminder`, not on the job.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchJob {
    pub to_email: String,
    pub subject: String,
    pub body: String,
    /// Set when the send was triggered by a `Reminder`, in which case
    /// the dispatch task owns that reminder's status transition.
    pub reminder_id: Option<ID>,
}

/// What the scheduler should do with a job after a dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RetryDecision {
    /// The email went out, nothing left to do
    Delivered,
    /// The attempt failed and the job has been re-enqueued with this delay
    RetryAfter(Duration),
    /// The attempt failed and no further attempt will be made
    Exhausted,
}
