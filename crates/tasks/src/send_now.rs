use crate::shared::usecase::UseCase;
use notimailer_domain::{DispatchJob, Reminder, ID};
use notimailer_infra::NotimailerContext;

/// Creates a reminder that is due immediately and enqueues its
/// dispatch without waiting for the next scan. The reminder record
/// exists so that the send shows up in the audit trail and retries
/// like any scheduled one.
#[derive(Debug)]
pub struct SendNowUseCase {
    pub user_id: ID,
    pub title: String,
    pub message: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    UserNotFound(ID),
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for SendNowUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "SendNow";

    async fn execute(&mut self, ctx: &NotimailerContext) -> Result<Self::Response, Self::Error> {
        let user = ctx
            .repos
            .users
            .find(&self.user_id)
            .await
            .ok_or_else(|| UseCaseError::UserNotFound(self.user_id.clone()))?;

        let now = ctx.sys.get_timestamp_millis();
        let reminder = Reminder::new(user.id.clone(), &self.title, &self.message, now, now);
        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        ctx.queue.enqueue(DispatchJob {
            to_email: user.email,
            subject: format!("Reminder: {}", reminder.title),
            body: reminder.message.clone(),
            reminder_id: Some(reminder.id.clone()),
        });

        Ok(reminder)
    }
}
