mod inmemory;
mod postgres;

pub use inmemory::InMemoryEmailLogRepo;
pub use postgres::PostgresEmailLogRepo;

use crate::repos::shared::repo::DeleteResult;
use notimailer_domain::{EmailLog, ID};

/// The delivery log is append-only: entries are inserted once per send
/// attempt and never mutated. The retention sweep is the only consumer
/// of `delete_all_before`.
#[async_trait::async_trait]
pub trait IEmailLogRepo: Send + Sync {
    async fn insert(&self, log: &EmailLog) -> anyhow::Result<()>;
    async fn find_by_reminder(&self, reminder_id: &ID) -> Vec<EmailLog>;
    /// Deletes every entry with `sent_at` strictly before the given
    /// timestamp and reports how many were removed
    async fn delete_all_before(&self, before: i64) -> DeleteResult;
}

#[cfg(test)]
mod tests {
    use super::*;
    use notimailer_domain::DeliveryStatus;

    fn log_factory(reminder_id: Option<ID>, sent_at: i64) -> EmailLog {
        EmailLog::success(reminder_id, "lisa@example.com", "Hello", "Hi there", sent_at)
    }

    #[tokio::test]
    async fn finds_entries_linked_to_a_reminder() {
        let repo = InMemoryEmailLogRepo::new();
        let reminder_id = ID::new();

        repo.insert(&log_factory(Some(reminder_id.clone()), 100))
            .await
            .unwrap();
        repo.insert(&log_factory(None, 100)).await.unwrap();
        repo.insert(&log_factory(Some(ID::new()), 100)).await.unwrap();

        let found = repo.find_by_reminder(&reminder_id).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].reminder_id, Some(reminder_id));
    }

    #[tokio::test]
    async fn stores_every_delivery_outcome() {
        let repo = InMemoryEmailLogRepo::new();
        let mut retrying = log_factory(Some(ID::new()), 100);
        retrying.status = DeliveryStatus::Retry;
        let failed = EmailLog::failed(
            None,
            "lisa@example.com",
            "Hello",
            "Hi there",
            "connection refused".into(),
            100,
        );

        repo.insert(&retrying).await.unwrap();
        repo.insert(&failed).await.unwrap();

        let found = repo.find_by_reminder(&retrying.reminder_id.clone().unwrap()).await;
        assert_eq!(found[0].status, DeliveryStatus::Retry);
    }

    #[tokio::test]
    async fn delete_all_before_is_a_noop_without_older_entries() {
        let repo = InMemoryEmailLogRepo::new();
        let reminder_id = ID::new();
        repo.insert(&log_factory(Some(reminder_id.clone()), 100))
            .await
            .unwrap();

        // Boundary entry is not "older than" and must survive
        let res = repo.delete_all_before(100).await;
        assert_eq!(res.deleted_count, 0);
        assert_eq!(repo.find_by_reminder(&reminder_id).await.len(), 1);

        let res = repo.delete_all_before(101).await;
        assert_eq!(res.deleted_count, 1);
        assert!(repo.find_by_reminder(&reminder_id).await.is_empty());
    }
}
