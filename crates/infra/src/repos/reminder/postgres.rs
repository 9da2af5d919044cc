use super::IReminderRepo;

use notimailer_domain::{Reminder, ReminderStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    user_uid: Uuid,
    title: String,
    message: String,
    send_at: i64,
    status: String,
    retry_count: i64,
    last_retry: Option<i64>,
    created: i64,
    updated: i64,
}

impl Into<Reminder> for ReminderRaw {
    fn into(self) -> Reminder {
        Reminder {
            id: self.reminder_uid.into(),
            user_id: self.user_uid.into(),
            title: self.title,
            message: self.message,
            send_at: self.send_at,
            status: self.status.parse().unwrap_or(ReminderStatus::Pending),
            retry_count: self.retry_count,
            last_retry: self.last_retry,
            created: self.created,
            updated: self.updated,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, user_uid, title, message, send_at, status, retry_count, last_retry, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.user_id.inner_ref())
        .bind(&reminder.title)
        .bind(&reminder.message)
        .bind(reminder.send_at)
        .bind(reminder.status.as_str())
        .bind(reminder.retry_count)
        .bind(reminder.last_retry)
        .bind(reminder.created)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminders
            SET title = $2,
            message = $3,
            send_at = $4,
            status = $5,
            retry_count = $6,
            last_retry = $7,
            updated = $8
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(&reminder.title)
        .bind(&reminder.message)
        .bind(reminder.send_at)
        .bind(reminder.status.as_str())
        .bind(reminder.retry_count)
        .bind(reminder.last_retry)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|reminder| reminder.into())
    }

    async fn find_due(&self, before: i64) -> Vec<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders
            WHERE status = $1 AND send_at <= $2
            "#,
        )
        .bind(ReminderStatus::Pending.as_str())
        .bind(before)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|reminder| reminder.into())
        .collect()
    }
}
