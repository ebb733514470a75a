use super::IReminderRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use mediscan_domain::{FoodInstruction, Reminder, TimeOfDay, TimeSlot, ID};
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

pub struct MongoReminderRepo {
    collection: Collection<Document>,
}

impl MongoReminderRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("reminders"),
        }
    }
}

fn id_and_user_filter(reminder_id: &ID, user_id: &ID) -> Document {
    doc! {
        "_id": reminder_id.inner(),
        "user_id": user_id.inner()
    }
}

#[async_trait::async_trait]
impl IReminderRepo for MongoReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        mongo_repo::insert::<_, ReminderMongo>(&self.collection, reminder).await
    }

    async fn set_last_sent(
        &self,
        reminder_id: &ID,
        slot_index: usize,
        last_sent: i64,
    ) -> anyhow::Result<()> {
        let mut set = Document::new();
        set.insert(format!("times.{}.last_sent", slot_index), last_sent);
        let filter = doc! {
            "_id": reminder_id.inner()
        };
        mongo_repo::update_one_by(&self.collection, filter, doc! { "$set": set }).await?;
        Ok(())
    }

    async fn set_active(
        &self,
        reminder_id: &ID,
        user_id: &ID,
        active: bool,
    ) -> anyhow::Result<Option<Reminder>> {
        let filter = id_and_user_filter(reminder_id, user_id);
        let update = doc! {
            "$set": { "active": active }
        };
        mongo_repo::find_one_and_update_by::<_, ReminderMongo>(&self.collection, filter, update)
            .await
    }

    async fn deactivate(&self, reminder_id: &ID) -> anyhow::Result<()> {
        let filter = doc! {
            "_id": reminder_id.inner()
        };
        let update = doc! {
            "$set": { "active": false }
        };
        mongo_repo::update_one_by(&self.collection, filter, update).await?;
        Ok(())
    }

    async fn find_active(&self) -> anyhow::Result<Vec<Reminder>> {
        let filter = doc! {
            "active": true
        };
        mongo_repo::find_many_by::<_, ReminderMongo>(&self.collection, filter).await
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let filter = doc! {
            "user_id": user_id.inner()
        };
        mongo_repo::find_many_by::<_, ReminderMongo>(&self.collection, filter).await
    }

    async fn find_by_id_and_user(
        &self,
        reminder_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<Reminder>> {
        let filter = id_and_user_filter(reminder_id, user_id);
        mongo_repo::find_one_by::<_, ReminderMongo>(&self.collection, filter).await
    }

    async fn delete_by_id_and_user(
        &self,
        reminder_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<Reminder>> {
        let filter = id_and_user_filter(reminder_id, user_id);
        mongo_repo::find_one_and_delete_by::<_, ReminderMongo>(&self.collection, filter).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TimeSlotMongo {
    time_of_day: TimeOfDay,
    exact_time: String,
    food_instruction: FoodInstruction,
    last_sent: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ReminderMongo {
    _id: ObjectId,
    user_id: ObjectId,
    medication: String,
    times: Vec<TimeSlotMongo>,
    start_date: i64,
    active: bool,
    created: i64,
}

impl MongoDocument<Reminder> for ReminderMongo {
    fn to_domain(self) -> Reminder {
        Reminder {
            id: ID::from(self._id),
            user_id: ID::from(self.user_id),
            medication: self.medication,
            times: self
                .times
                .into_iter()
                .map(|t| TimeSlot {
                    time_of_day: t.time_of_day,
                    exact_time: t.exact_time,
                    food_instruction: t.food_instruction,
                    last_sent: t.last_sent,
                })
                .collect(),
            start_date: self.start_date,
            active: self.active,
            created: self.created,
        }
    }

    fn from_domain(reminder: &Reminder) -> Self {
        Self {
            _id: reminder.id.inner(),
            user_id: reminder.user_id.inner(),
            medication: reminder.medication.clone(),
            times: reminder
                .times
                .iter()
                .map(|t| TimeSlotMongo {
                    time_of_day: t.time_of_day,
                    exact_time: t.exact_time.clone(),
                    food_instruction: t.food_instruction,
                    last_sent: t.last_sent,
                })
                .collect(),
            start_date: reminder.start_date,
            active: reminder.active,
            created: reminder.created,
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! {
            "_id": self._id
        }
    }
}
