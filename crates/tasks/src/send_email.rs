use crate::shared::usecase::UseCase;
use notimailer_domain::{retry_delay, DispatchJob, EmailLog, ReminderStatus, RetryDecision};
use notimailer_infra::NotimailerContext;
use tracing::warn;

/// Attempts to deliver one email, records the attempt in the delivery
/// log and keeps the linked `Reminder`'s status and retry bookkeeping
/// consistent with the outcome. Failed attempts are re-enqueued with
/// exponential backoff until the attempt ceiling is reached.
#[derive(Debug)]
pub struct SendEmailUseCase {
    pub job: DispatchJob,
}

/// Outcome of one dispatch attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryReport {
    pub delivered: bool,
    /// What the scheduler should do with the job next
    pub decision: RetryDecision,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for SendEmailUseCase {
    type Response = DeliveryReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SendEmail";

    async fn execute(&mut self, ctx: &NotimailerContext) -> Result<Self::Response, Self::Error> {
        let job = &self.job;
        let now = ctx.sys.get_timestamp_millis();

        match ctx.mailer.send(&job.to_email, &job.subject, &job.body).await {
            Ok(()) => {
                let log = EmailLog::success(
                    job.reminder_id.clone(),
                    &job.to_email,
                    &job.subject,
                    &job.body,
                    now,
                );
                ctx.repos
                    .email_logs
                    .insert(&log)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;

                self.complete_reminder(ctx, now).await?;

                Ok(DeliveryReport {
                    delivered: true,
                    decision: RetryDecision::Delivered,
                })
            }
            Err(e) => {
                let log = EmailLog::failed(
                    job.reminder_id.clone(),
                    &job.to_email,
                    &job.subject,
                    &job.body,
                    e.to_string(),
                    now,
                );
                ctx.repos
                    .email_logs
                    .insert(&log)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;

                let decision = self.register_failure(ctx, now).await?;

                Ok(DeliveryReport {
                    delivered: false,
                    decision,
                })
            }
        }
    }
}

impl SendEmailUseCase {
    /// Marks the linked reminder as sent. A reminder deleted while the
    /// dispatch was in flight only loses its status update, the email
    /// went out and was logged.
    async fn complete_reminder(
        &self,
        ctx: &NotimailerContext,
        now: i64,
    ) -> Result<(), UseCaseError> {
        let reminder_id = match &self.job.reminder_id {
            Some(id) => id,
            None => return Ok(()),
        };

        match ctx.repos.reminders.find(reminder_id).await {
            Some(mut reminder) => {
                reminder.status = ReminderStatus::Sent;
                reminder.updated = now;
                ctx.repos
                    .reminders
                    .save(&reminder)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
            }
            None => warn!(
                "Reminder {} was deleted before its dispatch completed",
                reminder_id
            ),
        }
        Ok(())
    }

    /// Increments the retry bookkeeping of the linked reminder and
    /// decides whether the job gets rescheduled with backoff or is
    /// declared exhausted.
    async fn register_failure(
        &self,
        ctx: &NotimailerContext,
        now: i64,
    ) -> Result<RetryDecision, UseCaseError> {
        let reminder_id = match &self.job.reminder_id {
            Some(id) => id,
            // Sends without a reminder carry no attempt bookkeeping to retry on
            None => return Ok(RetryDecision::Exhausted),
        };

        let mut reminder = match ctx.repos.reminders.find(reminder_id).await {
            Some(reminder) => reminder,
            None => {
                warn!(
                    "Reminder {} was deleted before its dispatch completed",
                    reminder_id
                );
                return Ok(RetryDecision::Exhausted);
            }
        };

        reminder.retry_count += 1;
        reminder.last_retry = Some(now);
        reminder.updated = now;

        let decision = if reminder.retries_exhausted() {
            reminder.status = ReminderStatus::Failed;
            RetryDecision::Exhausted
        } else {
            reminder.status = ReminderStatus::Pending;
            RetryDecision::RetryAfter(retry_delay(reminder.retry_count))
        };

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if let RetryDecision::RetryAfter(delay) = decision {
            ctx.queue.enqueue_delayed(self.job.clone(), delay);
        }

        Ok(decision)
    }
}
