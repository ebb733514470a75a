use mediscan_domain::{FoodInstruction, Reminder, TimeOfDay, TimeSlot, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotDTO {
    pub time_of_day: TimeOfDay,
    pub exact_time: String,
    pub food_instruction: FoodInstruction,
    pub last_sent: Option<i64>,
}

impl TimeSlotDTO {
    pub fn new(slot: TimeSlot) -> Self {
        Self {
            time_of_day: slot.time_of_day,
            exact_time: slot.exact_time,
            food_instruction: slot.food_instruction,
            last_sent: slot.last_sent,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub user_id: ID,
    pub medication: String,
    pub times: Vec<TimeSlotDTO>,
    pub start_date: i64,
    pub active: bool,
    pub created: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            user_id: reminder.user_id,
            medication: reminder.medication,
            times: reminder.times.into_iter().map(TimeSlotDTO::new).collect(),
            start_date: reminder.start_date,
            active: reminder.active,
            created: reminder.created,
        }
    }
}
