use super::IUserRepo;
use crate::repos::shared::inmemory_repo::{find, find_by, insert};
use chrono::Datelike;
use notimailer_domain::{User, ID};
use std::sync::Mutex;

pub struct InMemoryUserRepo {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        insert(user, &self.users);
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        find(user_id, &self.users)
    }

    async fn find_by_birthday(&self, month: u32, day: u32) -> Vec<User> {
        find_by(&self.users, |u| {
            u.birthdate.month() == month && u.birthdate.day() == day
        })
    }
}
