mod bmi;
pub mod date;
pub mod extraction;
mod medical_event;
mod reminder;
mod shared;
pub mod timeline;
mod user;

pub use bmi::{Bmi, BmiCategory};
pub use medical_event::{
    EventType, MedicalEvent, MedicalEventCandidate, Medication, Severity, UnknownVariantError,
    DEFAULT_MEDICATION_FREQUENCY,
};
pub use reminder::{ClockTime, FoodInstruction, InvalidClockTimeError, Reminder, TimeOfDay, TimeSlot};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use timeline::{
    DateRange, GroupedTimeline, MedicationStat, TimelineFilter, TimelineStats, TypeSeverityCount,
};
pub use user::{User, Vital, VITALS_UPDATE_INTERVAL_MILLIS};
