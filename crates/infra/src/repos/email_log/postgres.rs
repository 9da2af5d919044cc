use super::IEmailLogRepo;
use crate::repos::shared::repo::DeleteResult;

use notimailer_domain::{DeliveryStatus, EmailLog, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresEmailLogRepo {
    pool: PgPool,
}

impl PostgresEmailLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EmailLogRaw {
    log_uid: Uuid,
    reminder_uid: Option<Uuid>,
    to_email: String,
    subject: String,
    body: String,
    status: String,
    error: Option<String>,
    sent_at: i64,
}

impl Into<EmailLog> for EmailLogRaw {
    fn into(self) -> EmailLog {
        EmailLog {
            id: self.log_uid.into(),
            reminder_id: self.reminder_uid.map(|uid| uid.into()),
            to_email: self.to_email,
            subject: self.subject,
            body: self.body,
            status: self.status.parse().unwrap_or(DeliveryStatus::Failed),
            error: self.error,
            sent_at: self.sent_at,
        }
    }
}

#[async_trait::async_trait]
impl IEmailLogRepo for PostgresEmailLogRepo {
    async fn insert(&self, log: &EmailLog) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO email_logs
            (log_uid, reminder_uid, to_email, subject, body, status, error, sent_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(log.id.inner_ref())
        .bind(log.reminder_id.as_ref().map(|id| *id.inner_ref()))
        .bind(&log.to_email)
        .bind(&log.subject)
        .bind(&log.body)
        .bind(log.status.as_str())
        .bind(&log.error)
        .bind(log.sent_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_reminder(&self, reminder_id: &ID) -> Vec<EmailLog> {
        sqlx::query_as::<_, EmailLogRaw>(
            r#"
            SELECT * FROM email_logs
            WHERE reminder_uid = $1
            ORDER BY sent_at
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|log| log.into())
        .collect()
    }

    async fn delete_all_before(&self, before: i64) -> DeleteResult {
        let deleted_count = sqlx::query(
            r#"
            DELETE FROM email_logs
            WHERE sent_at < $1
            "#,
        )
        .bind(before)
        .execute(&self.pool)
        .await
        .map(|res| res.rows_affected() as i64)
        .unwrap_or(0);
        DeleteResult { deleted_count }
    }
}
