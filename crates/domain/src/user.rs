use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;

/// A registered profile. Owns `Reminder`s and is the recipient of the
/// emails the dispatch pipeline sends on its behalf.
#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub birthdate: NaiveDate,
}

impl User {
    pub fn new(name: &str, email: &str, birthdate: NaiveDate) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            email: email.into(),
            birthdate,
        }
    }
}

impl Entity<ID> for User {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
