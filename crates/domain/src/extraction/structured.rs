use super::patterns::{extract_date, extract_event_type, extract_severity};
use crate::medical_event::{
    EventType, MedicalEventCandidate, Medication, Severity, DEFAULT_MEDICATION_FREQUENCY,
};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuredEvent {
    event_date: Option<String>,
    event_type: Option<String>,
    description: Option<String>,
    severity: Option<String>,
    related_conditions: Option<Vec<String>>,
    medications: Option<Vec<StructuredMedication>>,
}

#[derive(Debug, Deserialize)]
struct StructuredMedication {
    name: String,
    dosage: Option<String>,
    frequency: Option<String>,
}

/// Language models like to wrap json in markdown code fences
fn strip_code_fence(text: &str) -> &str {
    let rest = match text.strip_prefix("```") {
        Some(rest) => rest,
        None => return text,
    };
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

fn parse_event_type(value: &str) -> EventType {
    value
        .parse()
        .unwrap_or_else(|_| extract_event_type(value))
}

fn parse_severity(value: &str) -> Severity {
    value.parse().unwrap_or_else(|_| extract_severity(value))
}

/// Parses a json array of events. Returns `None` when the text is not
/// such an array, which lets the caller fall back to the line based
/// extraction. Events without a description are skipped.
pub fn parse_events(text: &str, today: NaiveDate) -> Option<Vec<MedicalEventCandidate>> {
    let json = strip_code_fence(text.trim());
    if !json.starts_with('[') {
        return None;
    }
    let events: Vec<StructuredEvent> = serde_json::from_str(json).ok()?;

    let candidates = events
        .into_iter()
        .filter_map(|mut event| {
            let description = event.description.take()?.trim().to_string();
            if description.is_empty() {
                return None;
            }
            Some((description, event))
        })
        .enumerate()
        .map(|(sequence, (description, event))| MedicalEventCandidate {
            event_date: event
                .event_date
                .as_deref()
                .and_then(extract_date)
                .unwrap_or(today),
            event_type: event
                .event_type
                .as_deref()
                .map(parse_event_type)
                .unwrap_or_default(),
            description,
            severity: event
                .severity
                .as_deref()
                .map(parse_severity)
                .unwrap_or_default(),
            related_conditions: event.related_conditions.unwrap_or_default(),
            medications: event
                .medications
                .unwrap_or_default()
                .into_iter()
                .map(|m| Medication {
                    name: m.name,
                    dosage: m.dosage.unwrap_or_default(),
                    frequency: m
                        .frequency
                        .unwrap_or_else(|| DEFAULT_MEDICATION_FREQUENCY.to_string()),
                })
                .collect(),
            sequence,
        })
        .collect();

    Some(candidates)
}

#[cfg(test)]
mod test {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn it_parses_json_events() {
        let text = r#"[
            {
                "eventDate": "2023-05-10",
                "eventType": "Diagnosis",
                "description": "Diagnosed with hypertension",
                "severity": "Medium",
                "relatedConditions": ["Hypertension"],
                "medications": [{ "name": "Amlodipine", "dosage": "5 mg", "frequency": "Daily" }]
            },
            {
                "eventType": "follow-up",
                "description": "Review in six weeks"
            }
        ]"#;
        let candidates = parse_events(text, today()).expect("To parse events");
        assert_eq!(candidates.len(), 2);

        let first = &candidates[0];
        assert_eq!(first.event_date, NaiveDate::from_ymd_opt(2023, 5, 10).unwrap());
        assert_eq!(first.event_type, EventType::Diagnosis);
        assert_eq!(first.severity, Severity::Medium);
        assert_eq!(first.related_conditions, vec!["Hypertension".to_string()]);
        assert_eq!(
            first.medications,
            vec![Medication {
                name: "Amlodipine".into(),
                dosage: "5 mg".into(),
                frequency: "Daily".into()
            }]
        );
        assert_eq!(first.sequence, 0);

        let second = &candidates[1];
        assert_eq!(second.event_date, today());
        assert_eq!(second.event_type, EventType::FollowUp);
        assert_eq!(second.severity, Severity::Low);
        assert_eq!(second.sequence, 1);
    }

    #[test]
    fn it_accepts_fenced_json() {
        let text = "```json\n[{\"description\": \"Chest x-ray\", \"eventType\": \"Test\"}]\n```";
        let candidates = parse_events(text, today()).expect("To parse events");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].event_type, EventType::Test);
    }

    #[test]
    fn unknown_values_fall_back_to_defaults() {
        let text = r#"[{ "description": "Something", "eventType": "Checkup", "severity": "severe", "eventDate": "sometime" }]"#;
        let candidates = parse_events(text, today()).expect("To parse events");
        assert_eq!(candidates[0].event_type, EventType::Documentation);
        assert_eq!(candidates[0].severity, Severity::Low);
        assert_eq!(candidates[0].event_date, today());
    }

    #[test]
    fn events_without_description_are_skipped() {
        let text = r#"[{ "eventType": "Test" }, { "description": "Kept" }]"#;
        let candidates = parse_events(text, today()).expect("To parse events");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].description, "Kept");
        assert_eq!(candidates[0].sequence, 0);
    }

    #[test]
    fn non_json_text_is_not_structured() {
        assert!(parse_events("EVENT: something", today()).is_none());
        assert!(parse_events("[not json", today()).is_none());
        assert!(parse_events("{\"eventType\": \"Test\"}", today()).is_none());
    }
}
