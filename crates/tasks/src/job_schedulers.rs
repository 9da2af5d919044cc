use crate::{
    scan_birthdays::ScanBirthdaysUseCase, scan_reminders::ScanDueRemindersUseCase,
    shared::usecase::execute, sweep_email_logs::SweepEmailLogsUseCase,
};
use notimailer_infra::NotimailerContext;
use std::time::Duration;
use tokio::time::{interval, sleep_until, Instant};

const DAY_SECS: u64 = 60 * 60 * 24;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Aligns to the next minute boundary and then scans for due
/// reminders every 60 seconds.
pub fn start_reminder_scan_job(ctx: NotimailerContext) {
    tokio::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let mut minutely_interval = interval(Duration::from_secs(60));
        loop {
            minutely_interval.tick().await;
            let _ = execute(ScanDueRemindersUseCase, &ctx).await;
        }
    });
}

pub fn start_birthday_scan_job(ctx: NotimailerContext) {
    tokio::spawn(async move {
        let mut daily_interval = interval(Duration::from_secs(DAY_SECS));
        loop {
            daily_interval.tick().await;
            let _ = execute(ScanBirthdaysUseCase, &ctx).await;
        }
    });
}

pub fn start_log_retention_job(ctx: NotimailerContext) {
    tokio::spawn(async move {
        let mut daily_interval = interval(Duration::from_secs(DAY_SECS));
        loop {
            daily_interval.tick().await;
            let _ = execute(SweepEmailLogsUseCase, &ctx).await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 5), 5);
        assert_eq!(get_start_delay(50 * 1000, 10), 60);
        assert_eq!(get_start_delay(50 * 1000, 15), 55);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(60 * 1000, 10), 50);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
        assert_eq!(get_start_delay(59 * 1000, 1), 60);
    }
}
