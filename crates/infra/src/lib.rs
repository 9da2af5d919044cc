mod config;
mod queue;
mod repos;
mod services;
mod system;

pub use config::{Config, SmtpConfig};
pub use queue::{
    ChannelJobQueue, DispatchJobReceiver, IJobQueue, InMemoryJobQueue, QueuedDispatch,
};
pub use repos::{DeleteResult, IEmailLogRepo, IReminderRepo, IUserRepo, Repos};
pub use repos::{InMemoryEmailLogRepo, InMemoryReminderRepo, InMemoryUserRepo};
pub use services::{
    IMailTransport, InMemoryMailTransport, RecordedEmail, SmtpMailTransport, TransportError,
};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

/// Everything the task pipeline needs to do its job: the stores, the
/// mail transport, the job queue, the clock and the configuration.
#[derive(Clone)]
pub struct NotimailerContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mailer: Arc<dyn IMailTransport>,
    pub queue: Arc<dyn IJobQueue>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl NotimailerContext {
    async fn create(params: ContextParams, queue: Arc<dyn IJobQueue>) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let mailer =
            SmtpMailTransport::new(&config).expect("SMTP configuration must be set and valid");
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            mailer: Arc::new(mailer),
            queue,
        }
    }

    /// Context backed by inmemory repos, mailer and queue. Useful for testing.
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            mailer: Arc::new(InMemoryMailTransport::new()),
            queue: Arc::new(InMemoryJobQueue::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment.
/// Returns the receiving end of the dispatch job channel alongside it,
/// to be drained by the dispatch worker.
pub async fn setup_context() -> (NotimailerContext, DispatchJobReceiver) {
    let (queue, job_rx) = ChannelJobQueue::create();
    let context = NotimailerContext::create(
        ContextParams {
            postgres_connection_string: get_psql_connection_string(),
        },
        Arc::new(queue),
    )
    .await;
    (context, job_rx)
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
