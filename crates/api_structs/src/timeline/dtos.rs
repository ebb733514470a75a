use chrono::NaiveDate;
use mediscan_domain::{
    EventType, MedicalEvent, MedicationStat, Medication, Severity, TypeSeverityCount, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalEventDTO {
    pub id: ID,
    pub user_id: ID,
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

impl MedicalEventDTO {
    pub fn new(event: MedicalEvent) -> Self {
        Self {
            id: event.id,
            user_id: event.user_id,
            file_id: event.file_id,
            hospital: event.hospital,
            event_date: event.event_date,
            event_type: event.event_type,
            description: event.description,
            severity: event.severity,
            related_conditions: event.related_conditions,
            medications: event.medications,
            sequence: event.sequence,
            created: event.created,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSeverityCountDTO {
    pub event_type: EventType,
    pub severity: Severity,
    pub count: usize,
}

impl TypeSeverityCountDTO {
    pub fn new(count: TypeSeverityCount) -> Self {
        Self {
            event_type: count.event_type,
            severity: count.severity,
            count: count.count,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationStatDTO {
    pub name: String,
    pub occurrences: usize,
    pub last_prescribed: NaiveDate,
}

impl MedicationStatDTO {
    pub fn new(stat: MedicationStat) -> Self {
        Self {
            name: stat.name,
            occurrences: stat.occurrences,
            last_prescribed: stat.last_prescribed,
        }
    }
}
