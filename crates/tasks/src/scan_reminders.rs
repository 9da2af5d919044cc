use crate::shared::usecase::UseCase;
use notimailer_domain::DispatchJob;
use notimailer_infra::NotimailerContext;
use tracing::warn;

/// Collects every pending reminder whose `send_at` has passed and puts
/// a dispatch job for each of them on the queue. Runs once a minute.
#[derive(Debug)]
pub struct ScanDueRemindersUseCase;

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait]
impl UseCase for ScanDueRemindersUseCase {
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "ScanDueReminders";

    async fn execute(&mut self, ctx: &NotimailerContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let due = ctx.repos.reminders.find_due(now).await;

        let mut enqueued = 0;
        for reminder in due {
            let user = match ctx.repos.users.find(&reminder.user_id).await {
                Some(user) => user,
                None => {
                    warn!(
                        "Reminder {} has no owner, skipping dispatch",
                        reminder.id
                    );
                    continue;
                }
            };
            if user.email.is_empty() {
                warn!("User {} has no email address, skipping dispatch", user.id);
                continue;
            }

            ctx.queue.enqueue(DispatchJob {
                to_email: user.email,
                subject: format!("Reminder: {}", reminder.title),
                body: reminder.message.clone(),
                reminder_id: Some(reminder.id.clone()),
            });
            enqueued += 1;
        }

        Ok(enqueued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use chrono::NaiveDate;
    use notimailer_domain::{Reminder, ReminderStatus, User, ID};
    use notimailer_infra::{InMemoryJobQueue, NotimailerContext};
    use std::sync::Arc;

    async fn setup() -> (NotimailerContext, Arc<InMemoryJobQueue>) {
        let mut ctx = NotimailerContext::create_inmemory();
        let queue = Arc::new(InMemoryJobQueue::new());
        ctx.queue = queue.clone();
        (ctx, queue)
    }

    async fn insert_user(ctx: &NotimailerContext, email: &str) -> User {
        let user = User::new("Lisa", email, NaiveDate::from_ymd(1994, 3, 15));
        ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    #[tokio::test]
    async fn enqueues_one_job_per_due_reminder() {
        let (ctx, queue) = setup().await;
        let user = insert_user(&ctx, "lisa@example.com").await;
        let now = ctx.sys.get_timestamp_millis();

        let due_1 = Reminder::new(user.id.clone(), "Pay rent", "Rent is due", now - 1000, now);
        let due_2 = Reminder::new(user.id.clone(), "Water plants", "Dry soil", now, now);
        let future = Reminder::new(
            user.id.clone(),
            "Renew passport",
            "Expires soon",
            now + 1000 * 60 * 60,
            now,
        );
        let mut sent = Reminder::new(user.id.clone(), "Old one", "Done", now - 5000, now);
        sent.status = ReminderStatus::Sent;

        for reminder in [&due_1, &due_2, &future, &sent] {
            ctx.repos.reminders.insert(reminder).await.unwrap();
        }

        let enqueued = execute(ScanDueRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(enqueued, 2);

        let jobs = queue.jobs();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].job.subject, "Reminder: Pay rent");
        assert_eq!(jobs[0].job.reminder_id, Some(due_1.id.clone()));
        assert_eq!(jobs[1].job.subject, "Reminder: Water plants");
        assert!(jobs.iter().all(|j| j.job.to_email == "lisa@example.com"));
    }

    #[tokio::test]
    async fn skips_reminders_without_an_owner() {
        let (ctx, queue) = setup().await;
        let now = ctx.sys.get_timestamp_millis();

        let orphan = Reminder::new(ID::new(), "Pay rent", "Rent is due", now - 1000, now);
        ctx.repos.reminders.insert(&orphan).await.unwrap();

        let enqueued = execute(ScanDueRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(enqueued, 0);
        assert!(queue.jobs().is_empty());
    }

    #[tokio::test]
    async fn a_reminder_stays_due_until_its_dispatch_completes() {
        let (ctx, queue) = setup().await;
        let user = insert_user(&ctx, "lisa@example.com").await;
        let now = ctx.sys.get_timestamp_millis();

        let reminder = Reminder::new(user.id.clone(), "Pay rent", "Rent is due", now - 1000, now);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        execute(ScanDueRemindersUseCase, &ctx).await.unwrap();
        let first_pass = queue.drain();
        assert_eq!(first_pass.len(), 1);

        // At-least-once: a scan that runs before the dispatch finished
        // enqueues the same reminder again
        execute(ScanDueRemindersUseCase, &ctx).await.unwrap();
        let second_pass = queue.drain();
        assert_eq!(second_pass.len(), 1);
        assert_eq!(second_pass[0].job, first_pass[0].job);
    }
}
