use crate::dtos::{MedicalEventDTO, MedicationStatDTO, TypeSeverityCountDTO};
use chrono::NaiveDate;
use mediscan_domain::{GroupedTimeline, MedicalEvent, TimelineStats};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query parameters shared by the timeline endpoints
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineQueryParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub event_type: Option<String>,
    pub severity: Option<String>,
    pub hospital: Option<String>,
}

pub mod extract_timeline_events {
    use super::*;
    use mediscan_domain::ID;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub file_id: ID,
        #[serde(default)]
        pub hospital: Option<String>,
        pub text_content: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub events: Vec<MedicalEventDTO>,
    }

    impl APIResponse {
        pub fn new(events: Vec<MedicalEvent>) -> Self {
            Self {
                events: events.into_iter().map(MedicalEventDTO::new).collect(),
            }
        }
    }
}

pub mod get_timeline {
    use super::*;

    pub type QueryParams = TimelineQueryParams;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        /// Newest first
        pub events: Vec<MedicalEventDTO>,
        /// Year -> zero based month -> events
        pub grouped: BTreeMap<i32, BTreeMap<u32, Vec<MedicalEventDTO>>>,
    }

    impl APIResponse {
        pub fn new(events: Vec<MedicalEvent>, grouped: GroupedTimeline) -> Self {
            Self {
                events: events.into_iter().map(MedicalEventDTO::new).collect(),
                grouped: grouped
                    .into_iter()
                    .map(|(year, months)| {
                        let months: BTreeMap<u32, Vec<MedicalEventDTO>> = months
                            .into_iter()
                            .map(|(month, events)| {
                                let events = events.into_iter().map(MedicalEventDTO::new);
                                (month, events.collect::<Vec<_>>())
                            })
                            .collect();
                        (year, months)
                    })
                    .collect(),
            }
        }
    }
}

pub mod get_timeline_stats {
    use super::*;

    pub type QueryParams = TimelineQueryParams;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub stats: Vec<TypeSeverityCountDTO>,
        pub medications: Vec<MedicationStatDTO>,
    }

    impl APIResponse {
        pub fn new(stats: TimelineStats) -> Self {
            Self {
                stats: stats
                    .by_type_severity
                    .into_iter()
                    .map(TypeSeverityCountDTO::new)
                    .collect(),
                medications: stats
                    .medications
                    .into_iter()
                    .map(MedicationStatDTO::new)
                    .collect(),
            }
        }
    }
}
