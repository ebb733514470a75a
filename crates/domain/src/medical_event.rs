use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventType {
    Diagnosis,
    Treatment,
    Medication,
    Test,
    Surgery,
    #[serde(rename = "Follow-up")]
    FollowUp,
    /// Used when no category could be determined
    Documentation,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diagnosis => "Diagnosis",
            Self::Treatment => "Treatment",
            Self::Medication => "Medication",
            Self::Test => "Test",
            Self::Surgery => "Surgery",
            Self::FollowUp => "Follow-up",
            Self::Documentation => "Documentation",
        }
    }
}

impl Default for EventType {
    fn default() -> Self {
        Self::Documentation
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Unknown value: `{0}`")]
pub struct UnknownVariantError(String);

impl FromStr for EventType {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "diagnosis" => Ok(Self::Diagnosis),
            "treatment" => Ok(Self::Treatment),
            "medication" => Ok(Self::Medication),
            "test" => Ok(Self::Test),
            "surgery" => Ok(Self::Surgery),
            "follow-up" | "follow up" | "followup" => Ok(Self::FollowUp),
            "documentation" => Ok(Self::Documentation),
            _ => Err(UnknownVariantError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::Low
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(UnknownVariantError(s.to_string())),
        }
    }
}

pub const DEFAULT_MEDICATION_FREQUENCY: &str = "As prescribed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
}

/// An extracted medical event which is not yet associated with a
/// `User` or a document and therefore not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicalEventCandidate {
    pub event_date: NaiveDate,
    pub event_type: EventType,
    pub description: String,
    pub severity: Severity,
    pub related_conditions: Vec<String>,
    pub medications: Vec<Medication>,
    /// Position of the candidate in the text it was extracted from
    pub sequence: usize,
}

impl MedicalEventCandidate {
    pub fn into_event(self, user_id: ID, file_id: ID, hospital: &str, created: i64) -> MedicalEvent {
        MedicalEvent {
            id: Default::default(),
            user_id,
            file_id,
            hospital: hospital.to_string(),
            event_date: self.event_date,
            event_type: self.event_type,
            description: self.description,
            severity: self.severity,
            related_conditions: self.related_conditions,
            medications: self.medications,
            sequence: self.sequence as i64,
            created,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MedicalEvent {
    pub id: ID,
    pub user_id: ID,
    /// The document this event was extracted from
    pub file_id: ID,
    pub hospital: String,
    pub event_date: NaiveDate,
    pub event_type: EventType,
    pub description: String,
    pub severity: Severity,
    pub related_conditions: Vec<String>,
    pub medications: Vec<Medication>,
    pub sequence: i64,
    pub created: i64,
}

impl Entity for MedicalEvent {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_parses_event_types_case_insensitively() {
        assert_eq!("diagnosis".parse(), Ok(EventType::Diagnosis));
        assert_eq!("FOLLOW-UP".parse(), Ok(EventType::FollowUp));
        assert_eq!(" Surgery ".parse(), Ok(EventType::Surgery));
        assert!("checkup".parse::<EventType>().is_err());
    }

    #[test]
    fn it_parses_severities() {
        assert_eq!("Critical".parse(), Ok(Severity::Critical));
        assert_eq!("low".parse(), Ok(Severity::Low));
        assert!("severe".parse::<Severity>().is_err());
    }

    #[test]
    fn follow_up_serializes_with_hyphen() {
        // Stored and exposed names must match what clients filter on
        assert_eq!(EventType::FollowUp.to_string(), "Follow-up");
        assert_eq!(
            serde_json::to_string(&EventType::FollowUp).unwrap(),
            "\"Follow-up\""
        );
    }

    #[test]
    fn candidate_keeps_its_fields_when_attached() {
        let candidate = MedicalEventCandidate {
            event_date: NaiveDate::from_ymd_opt(2023, 5, 10).unwrap(),
            event_type: EventType::Diagnosis,
            description: "Diagnosed".into(),
            severity: Severity::High,
            related_conditions: vec!["Lyme disease".into()],
            medications: vec![],
            sequence: 3,
        };
        let user_id = ID::new();
        let file_id = ID::new();
        let event = candidate
            .clone()
            .into_event(user_id, file_id, "City Hospital", 42);
        assert_eq!(event.user_id, user_id);
        assert_eq!(event.file_id, file_id);
        assert_eq!(event.hospital, "City Hospital");
        assert_eq!(event.event_date, candidate.event_date);
        assert_eq!(event.severity, Severity::High);
        assert_eq!(event.related_conditions, candidate.related_conditions);
        assert_eq!(event.sequence, 3);
        assert_eq!(event.created, 42);
    }
}
