mod inmemory;
mod mongo;

pub use inmemory::InMemoryReminderRepo;
use mediscan_domain::{Reminder, ID};
pub use mongo::MongoReminderRepo;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// Records a successful notification for the slot at `slot_index`
    /// without touching the other fields
    async fn set_last_sent(
        &self,
        reminder_id: &ID,
        slot_index: usize,
        last_sent: i64,
    ) -> anyhow::Result<()>;
    /// Returns the updated `Reminder`, `None` when the owner does not match
    async fn set_active(
        &self,
        reminder_id: &ID,
        user_id: &ID,
        active: bool,
    ) -> anyhow::Result<Option<Reminder>>;
    async fn deactivate(&self, reminder_id: &ID) -> anyhow::Result<()>;
    async fn find_active(&self) -> anyhow::Result<Vec<Reminder>>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    async fn find_by_id_and_user(
        &self,
        reminder_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<Reminder>>;
    /// Returns the deleted `Reminder` if there was one
    async fn delete_by_id_and_user(
        &self,
        reminder_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<Reminder>>;
}
