use crate::shared::usecase::UseCase;
use chrono::Datelike;
use notimailer_domain::DispatchJob;
use notimailer_infra::NotimailerContext;
use tracing::warn;

const BIRTHDAY_SUBJECT: &str = "Happy Birthday!";

/// Enqueues a greeting for every user whose birthday falls on the
/// current UTC date. Matching is on month and day only, the birth year
/// is ignored. Runs once a day.
#[derive(Debug)]
pub struct ScanBirthdaysUseCase;

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait]
impl UseCase for ScanBirthdaysUseCase {
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "ScanBirthdays";

    async fn execute(&mut self, ctx: &NotimailerContext) -> Result<Self::Response, Self::Error> {
        let today = ctx.sys.get_datetime().naive_utc().date();
        let celebrants = ctx
            .repos
            .users
            .find_by_birthday(today.month(), today.day())
            .await;

        let mut enqueued = 0;
        for user in celebrants {
            if user.email.is_empty() {
                warn!("User {} has no email address, skipping greeting", user.id);
                continue;
            }

            ctx.queue.enqueue(DispatchJob {
                to_email: user.email,
                subject: BIRTHDAY_SUBJECT.into(),
                body: format!("Hi {}, happy birthday! Have a great day.", user.name),
                reminder_id: None,
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
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use notimailer_domain::User;
    use notimailer_infra::{ISys, InMemoryJobQueue, NotimailerContext};
    use std::sync::Arc;

    struct StaticTimeSys;
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.get_datetime().timestamp_millis()
        }
        fn get_datetime(&self) -> DateTime<Utc> {
            Utc.ymd(2024, 3, 15).and_hms(12, 0, 0)
        }
    }

    async fn setup() -> (NotimailerContext, Arc<InMemoryJobQueue>) {
        let mut ctx = NotimailerContext::create_inmemory();
        let queue = Arc::new(InMemoryJobQueue::new());
        ctx.queue = queue.clone();
        ctx.sys = Arc::new(StaticTimeSys);
        (ctx, queue)
    }

    #[tokio::test]
    async fn greets_users_born_on_this_day() {
        let (ctx, queue) = setup().await;

        let lisa = User::new("Lisa", "lisa@example.com", NaiveDate::from_ymd(1994, 3, 15));
        let pete = User::new("Pete", "pete@example.com", NaiveDate::from_ymd(1988, 7, 2));
        ctx.repos.users.insert(&lisa).await.unwrap();
        ctx.repos.users.insert(&pete).await.unwrap();

        let enqueued = execute(ScanBirthdaysUseCase, &ctx).await.unwrap();
        assert_eq!(enqueued, 1);

        let jobs = queue.jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].job.to_email, "lisa@example.com");
        assert_eq!(jobs[0].job.subject, BIRTHDAY_SUBJECT);
        assert!(jobs[0].job.body.contains("Lisa"));
        assert_eq!(jobs[0].job.reminder_id, None);
    }

    #[tokio::test]
    async fn the_birth_year_does_not_matter() {
        let (ctx, queue) = setup().await;

        let old = User::new("Ruth", "ruth@example.com", NaiveDate::from_ymd(1950, 3, 15));
        let young = User::new("Max", "max@example.com", NaiveDate::from_ymd(2020, 3, 15));
        ctx.repos.users.insert(&old).await.unwrap();
        ctx.repos.users.insert(&young).await.unwrap();

        let enqueued = execute(ScanBirthdaysUseCase, &ctx).await.unwrap();
        assert_eq!(enqueued, 2);
        assert_eq!(queue.jobs().len(), 2);
    }

    #[tokio::test]
    async fn skips_users_without_an_email_address() {
        let (ctx, queue) = setup().await;

        let user = User::new("Lisa", "", NaiveDate::from_ymd(1994, 3, 15));
        ctx.repos.users.insert(&user).await.unwrap();

        let enqueued = execute(ScanBirthdaysUseCase, &ctx).await.unwrap();
        assert_eq!(enqueued, 0);
        assert!(queue.jobs().is_empty());
    }
}
