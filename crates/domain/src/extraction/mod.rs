mod patterns;
mod structured;

use crate::medical_event::{EventType, MedicalEventCandidate, Severity};
use chrono::NaiveDate;
pub use patterns::{
    extract_conditions, extract_date, extract_event_type, extract_medications, extract_severity,
};

/// Lines starting with this tag describe one medical event each
pub const EVENT_MARKER: &str = "EVENT:";
pub const DEFAULT_EVENT_DESCRIPTION: &str = "Medical document processed and archived";

/// Extracts medical event candidates from document text.
///
/// A json array of events is used as is. Otherwise every line starting with
/// `EVENT:` becomes one candidate. When neither yields anything a single
/// default candidate is returned, so the result is never empty.
/// `today` is used for events without a recoverable date.
pub fn extract(text: &str, today: NaiveDate) -> Vec<MedicalEventCandidate> {
    let candidates = match structured::parse_events(text, today) {
        Some(candidates) if !candidates.is_empty() => candidates,
        _ => extract_from_event_lines(text, today),
    };
    if candidates.is_empty() {
        return vec![default_candidate(today)];
    }
    candidates
}

fn event_line_description(line: &str) -> Option<&str> {
    let line = line.trim_start();
    // Tolerate markdown list bullets and bold markers in front of the tag
    let line = line
        .trim_start_matches(|c: char| c == '-' || c == '*' || c == '•')
        .trim_start();
    let description = line.strip_prefix(EVENT_MARKER)?;
    Some(description.trim_start_matches('*').trim())
}

pub fn extract_from_event_lines(text: &str, today: NaiveDate) -> Vec<MedicalEventCandidate> {
    text.lines()
        .filter_map(event_line_description)
        .enumerate()
        .map(|(sequence, description)| candidate_from_line(description, sequence, today))
        .collect()
}

pub fn candidate_from_line(
    description: &str,
    sequence: usize,
    today: NaiveDate,
) -> MedicalEventCandidate {
    MedicalEventCandidate {
        event_date: extract_date(description).unwrap_or(today),
        event_type: extract_event_type(description),
        description: description.to_string(),
        severity: extract_severity(description),
        related_conditions: extract_conditions(description),
        medications: extract_medications(description),
        sequence,
    }
}

pub fn default_candidate(today: NaiveDate) -> MedicalEventCandidate {
    MedicalEventCandidate {
        event_date: today,
        event_type: EventType::Test,
        description: DEFAULT_EVENT_DESCRIPTION.to_string(),
        severity: Severity::Low,
        related_conditions: Vec::new(),
        medications: Vec::new(),
        sequence: 0,
    }
}
