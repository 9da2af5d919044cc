use crate::{send_email::SendEmailUseCase, shared::usecase::execute};
use notimailer_infra::{DispatchJobReceiver, NotimailerContext};
use tracing::info;

/// Drains the dispatch queue one job at a time. Runs until every
/// queue handle has been dropped.
pub async fn run_dispatch_worker(ctx: NotimailerContext, mut job_rx: DispatchJobReceiver) {
    info!("Dispatch worker started");
    while let Some(job) = job_rx.recv().await {
        let _ = execute(SendEmailUseCase { job }, &ctx).await;
    }
    info!("Dispatch queue closed, dispatch worker stopping");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use notimailer_domain::{DispatchJob, Reminder, ReminderStatus, User};
    use notimailer_infra::{ChannelJobQueue, IJobQueue, InMemoryMailTransport, NotimailerContext};
    use std::sync::Arc;

    #[tokio::test]
    async fn delivers_queued_jobs_until_the_queue_closes() {
        let mut ctx = NotimailerContext::create_inmemory();
        let mailer = Arc::new(InMemoryMailTransport::new());
        ctx.mailer = mailer.clone();

        let user = User::new("Lisa", "lisa@example.com", NaiveDate::from_ymd(1994, 3, 15));
        ctx.repos.users.insert(&user).await.unwrap();
        let now = ctx.sys.get_timestamp_millis();
        let reminder = Reminder::new(user.id.clone(), "Pay rent", "Rent is due", now, now);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let (queue, job_rx) = ChannelJobQueue::create();
        queue.enqueue(DispatchJob {
            to_email: user.email.clone(),
            subject: format!("Reminder: {}", reminder.title),
            body: reminder.message.clone(),
            reminder_id: Some(reminder.id.clone()),
        });
        drop(queue);

        run_dispatch_worker(ctx.clone(), job_rx).await;

        assert_eq!(mailer.sent().len(), 1);
        let reminder = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(reminder.status, ReminderStatus::Sent);
    }
}
