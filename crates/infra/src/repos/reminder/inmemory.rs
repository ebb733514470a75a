use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use mediscan_domain::{Reminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn set_last_sent(
        &self,
        reminder_id: &ID,
        slot_index: usize,
        last_sent: i64,
    ) -> anyhow::Result<()> {
        update_one_by(
            &self.reminders,
            |r| r.id == *reminder_id,
            |r| {
                if let Some(slot) = r.times.get_mut(slot_index) {
                    slot.last_sent = Some(last_sent);
                }
            },
        );
        Ok(())
    }

    async fn set_active(
        &self,
        reminder_id: &ID,
        user_id: &ID,
        active: bool,
    ) -> anyhow::Result<Option<Reminder>> {
        Ok(update_one_by(
            &self.reminders,
            |r| r.id == *reminder_id && r.user_id == *user_id,
            |r| r.active = active,
        ))
    }

    async fn deactivate(&self, reminder_id: &ID) -> anyhow::Result<()> {
        update_one_by(&self.reminders, |r| r.id == *reminder_id, |r| r.active = false);
        Ok(())
    }

    async fn find_active(&self) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| r.active))
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| r.user_id == *user_id))
    }

    async fn find_by_id_and_user(
        &self,
        reminder_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<Reminder>> {
        let reminders = find_by(&self.reminders, |r| {
            r.id == *reminder_id && r.user_id == *user_id
        });
        Ok(reminders.into_iter().next())
    }

    async fn delete_by_id_and_user(
        &self,
        reminder_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<Reminder>> {
        Ok(find_and_delete_one_by(&self.reminders, |r| {
            r.id == *reminder_id && r.user_id == *user_id
        }))
    }
}
