mod email_log;
mod reminder;
mod shared;
mod user;

pub use email_log::{IEmailLogRepo, InMemoryEmailLogRepo, PostgresEmailLogRepo};
pub use reminder::{IReminderRepo, InMemoryReminderRepo, PostgresReminderRepo};
pub use shared::repo::DeleteResult;
pub use user::{IUserRepo, InMemoryUserRepo, PostgresUserRepo};

use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub email_logs: Arc<dyn IEmailLogRepo>,
    pub users: Arc<dyn IUserRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        // This is needed to make sure that db is ready when opening server
        info!("DB CHECKING CONNECTION ...");
        sqlx::query("SELECT 1").execute(&pool).await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            email_logs: Arc::new(PostgresEmailLogRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            email_logs: Arc::new(InMemoryEmailLogRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
        }
    }
}
