mod dispatch;
mod email_log;
mod reminder;
mod shared;
mod user;

pub use dispatch::{DispatchJob, RetryDecision};
pub use email_log::{DeliveryStatus, EmailLog};
pub use reminder::{retry_delay, Reminder, ReminderStatus, MAX_DELIVERY_ATTEMPTS};
pub use shared::entity::{Entity, ID};
pub use user::User;
