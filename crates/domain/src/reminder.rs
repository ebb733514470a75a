use crate::{
    date::{is_same_minute, to_datetime},
    shared::entity::{Entity, ID},
};
use chrono::Timelike;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
            Self::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodInstruction {
    #[serde(rename = "Before Food")]
    BeforeFood,
    #[serde(rename = "After Food")]
    AfterFood,
}

impl Display for FoodInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let instruction = match self {
            Self::BeforeFood => "Before Food",
            Self::AfterFood => "After Food",
        };
        write!(f, "{}", instruction)
    }
}

/// A 24-hour wall clock time with minute resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidClockTimeError {
    #[error("Clock time: `{0}` is not in the HH:MM format")]
    Malformed(String),
}

impl FromStr for ClockTime {
    type Err = InvalidClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || InvalidClockTimeError::Malformed(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(err)?;
        let hour = hour.parse::<u32>().map_err(|_| err())?;
        let minute = minute.parse::<u32>().map_err(|_| err())?;
        if hour > 23 || minute > 59 {
            return Err(err());
        }
        Ok(Self { hour, minute })
    }
}

/// One scheduled time of day within a `Reminder`
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlot {
    pub time_of_day: TimeOfDay,
    /// "HH:MM" in 24-hour format
    pub exact_time: String,
    pub food_instruction: FoodInstruction,
    /// Timestamp in millis of the last successful notification for this slot
    pub last_sent: Option<i64>,
}

impl TimeSlot {
    pub fn new(time_of_day: TimeOfDay, exact_time: &str, food_instruction: FoodInstruction) -> Self {
        Self {
            time_of_day,
            exact_time: exact_time.to_string(),
            food_instruction,
            last_sent: None,
        }
    }

    pub fn clock_time(&self) -> Result<ClockTime, InvalidClockTimeError> {
        self.exact_time.parse()
    }

    /// Whether the hour and minute of `now` (in the `tz` timezone) equal the
    /// scheduled clock time. Malformed times never match.
    pub fn is_scheduled_at(&self, now: i64, tz: &Tz) -> bool {
        let clock_time = match self.clock_time() {
            Ok(t) => t,
            Err(_) => return false,
        };
        match to_datetime(now, tz) {
            Some(now) => now.hour() == clock_time.hour && now.minute() == clock_time.minute,
            None => false,
        }
    }

    pub fn was_sent_in_minute_of(&self, now: i64) -> bool {
        match self.last_sent {
            Some(last_sent) => is_same_minute(last_sent, now),
            None => false,
        }
    }

    pub fn should_fire(&self, now: i64, tz: &Tz) -> bool {
        self.is_scheduled_at(now, tz) && !self.was_sent_in_minute_of(now)
    }
}

/// A `Reminder` tells its owning `User` to take a medication at
/// one or more times every day.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    pub user_id: ID,
    pub medication: String,
    pub times: Vec<TimeSlot>,
    pub start_date: i64,
    /// Paused reminders and reminders of deleted users are inactive
    pub active: bool,
    pub created: i64,
}

impl Reminder {
    pub fn new(user_id: ID, medication: &str, times: Vec<TimeSlot>, now: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            medication: medication.trim().to_string(),
            times,
            start_date: now,
            active: true,
            created: now,
        }
    }

    pub fn message(&self, slot: &TimeSlot) -> String {
        format!(
            "Time to take your {} ({}) - {}",
            self.medication, slot.time_of_day, slot.food_instruction
        )
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}
