mod job_schedulers;
mod scan_birthdays;
mod scan_reminders;
mod send_email;
mod send_now;
mod shared;
mod sweep_email_logs;
mod worker;

use job_schedulers::{start_birthday_scan_job, start_log_retention_job, start_reminder_scan_job};
use notimailer_infra::{DispatchJobReceiver, NotimailerContext};
use tracing::info;
use worker::run_dispatch_worker;

pub use scan_birthdays::ScanBirthdaysUseCase;
pub use scan_reminders::ScanDueRemindersUseCase;
pub use send_email::{DeliveryReport, SendEmailUseCase};
pub use send_now::SendNowUseCase;
pub use shared::usecase::{execute, UseCase};
pub use sweep_email_logs::SweepEmailLogsUseCase;

pub struct Application {
    context: NotimailerContext,
    job_rx: DispatchJobReceiver,
}

impl Application {
    pub fn new(context: NotimailerContext, job_rx: DispatchJobReceiver) -> Self {
        Self { context, job_rx }
    }

    /// Starts the periodic scan jobs and then blocks on the dispatch
    /// worker loop.
    pub async fn start(self) {
        start_job_schedulers(self.context.clone());
        info!("Job schedulers started");

        run_dispatch_worker(self.context, self.job_rx).await
    }
}

fn start_job_schedulers(context: NotimailerContext) {
    start_reminder_scan_job(context.clone());
    start_birthday_scan_job(context.clone());
    start_log_retention_job(context);
}
