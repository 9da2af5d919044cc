use super::IEmailLogRepo;
use crate::repos::shared::inmemory_repo::{delete_by, find_by, insert};
use crate::repos::shared::repo::DeleteResult;
use notimailer_domain::{EmailLog, ID};
use std::sync::Mutex;

pub struct InMemoryEmailLogRepo {
    logs: Mutex<Vec<EmailLog>>,
}

impl InMemoryEmailLogRepo {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
        }
    }

    /// Every stored entry, in insertion order. Useful for asserting on
    /// reminder-less sends in tests.
    pub fn all(&self) -> Vec<EmailLog> {
        find_by(&self.logs, |_| true)
    }
}

#[async_trait::async_trait]
impl IEmailLogRepo for InMemoryEmailLogRepo {
    async fn insert(&self, log: &EmailLog) -> anyhow::Result<()> {
        insert(log, &self.logs);
        Ok(())
    }

    async fn find_by_reminder(&self, reminder_id: &ID) -> Vec<EmailLog> {
        find_by(&self.logs, |l| l.reminder_id.as_ref() == Some(reminder_id))
    }

    async fn delete_all_before(&self, before: i64) -> DeleteResult {
        delete_by(&self.logs, |l| l.sent_at < before)
    }
}
