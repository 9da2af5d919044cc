mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;

use notimailer_domain::{User, ID};

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    /// Every user whose birthdate matches the given month and day, the
    /// birth year is ignored
    async fn find_by_birthday(&self, month: u32, day: u32) -> Vec<User>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn matches_birthdays_across_years() {
        let repo = InMemoryUserRepo::new();

        let lisa = User::new("Lisa", "lisa@example.com", NaiveDate::from_ymd(1994, 3, 15));
        let ola = User::new("Ola", "ola@example.com", NaiveDate::from_ymd(1987, 3, 15));
        let kari = User::new("Kari", "kari@example.com", NaiveDate::from_ymd(1994, 3, 16));

        repo.insert(&lisa).await.unwrap();
        repo.insert(&ola).await.unwrap();
        repo.insert(&kari).await.unwrap();

        let matches = repo.find_by_birthday(3, 15).await;
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|u| u.birthdate.to_string().ends_with("03-15")));

        assert!(repo.find_by_birthday(12, 24).await.is_empty());
    }

    #[tokio::test]
    async fn finds_users_by_id() {
        let repo = InMemoryUserRepo::new();
        let lisa = User::new("Lisa", "lisa@example.com", NaiveDate::from_ymd(1994, 3, 15));
        repo.insert(&lisa).await.unwrap();

        assert_eq!(repo.find(&lisa.id).await.unwrap().email, "lisa@example.com");
        assert!(repo.find(&Default::default()).await.is_none());
    }
}
