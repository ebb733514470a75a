use crate::dtos::ReminderDTO;
use mediscan_domain::{Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReminderPathParams {
    pub reminder_id: ID,
}

pub mod create_reminder {
    use super::*;
    use mediscan_domain::{FoodInstruction, TimeOfDay};

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TimeSlotBody {
        pub time_of_day: TimeOfDay,
        pub exact_time: String,
        pub food_instruction: FoodInstruction,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub medication: String,
        #[serde(default)]
        pub times: Vec<TimeSlotBody>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod pause_reminder {
    use super::*;

    pub type PathParams = ReminderPathParams;
    pub type APIResponse = ReminderResponse;
}

pub mod resume_reminder {
    use super::*;

    pub type PathParams = ReminderPathParams;
    pub type APIResponse = ReminderResponse;
}

pub mod delete_reminder {
    use super::*;

    pub type PathParams = ReminderPathParams;
    pub type APIResponse = ReminderResponse;
}
