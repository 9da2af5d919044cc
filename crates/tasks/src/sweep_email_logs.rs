use crate::shared::usecase::UseCase;
use notimailer_infra::NotimailerContext;
use tracing::info;

const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// Deletes delivery log entries older than the configured retention
/// window. Runs once a day.
#[derive(Debug)]
pub struct SweepEmailLogsUseCase;

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for SweepEmailLogsUseCase {
    type Response = i64;

    type Error = UseCaseError;

    const NAME: &'static str = "SweepEmailLogs";

    async fn execute(&mut self, ctx: &NotimailerContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let cutoff = now - ctx.config.log_retention_days * MILLIS_PER_DAY;

        let res = ctx.repos.email_logs.delete_all_before(cutoff).await;

        if res.deleted_count > 0 {
            info!("Deleted {} expired email log entries", res.deleted_count);
        }

        Ok(res.deleted_count)
    }
}
