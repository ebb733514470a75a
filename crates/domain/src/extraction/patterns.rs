use crate::medical_event::{EventType, Medication, Severity, DEFAULT_MEDICATION_FREQUENCY};
use chrono::NaiveDate;
use regex::{Captures, Regex};
use std::sync::LazyLock;

// Each extractor is independent of the others so that a malformed field
// never prevents the rest of the line from being extracted.

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?P<iso>\d{4}-\d{2}-\d{2})|\b(?P<month>jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(?P<day>\d{1,2}),?\s*(?P<year>\d{4})\b",
    )
    .unwrap()
});

static EVENT_TYPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(?P<diagnosis>diagnos[a-z]*)|(?P<treatment>treat(?:ment|ments|ed|ing)?)|(?P<medication>medications?)|(?P<test>test(?:s|ed|ing)?)|(?P<surgery>surger(?:y|ies)|surgical)|(?P<follow_up>follow[- ]?ups?))\b",
    )
    .unwrap()
});

static SEVERITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(critical|high|medium|low)\b").unwrap());

static MEDICATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?P<name>[A-Za-z]+)\s+(?P<dosage>\d+(?:\.\d+)?\s*(?i:mg|mcg|g|ml))\b").unwrap()
});

static CONDITION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\s+(?i:syndrome|disease|disorder|condition|infection)s?\b",
    )
    .unwrap()
});

fn month_number(month: &str) -> Option<u32> {
    let month = match month.to_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn date_from_captures(caps: &Captures) -> Option<NaiveDate> {
    if let Some(iso) = caps.name("iso") {
        return NaiveDate::parse_from_str(iso.as_str(), "%Y-%m-%d").ok();
    }
    let month = month_number(caps.name("month")?.as_str())?;
    let day = caps.name("day")?.as_str().parse().ok()?;
    let year = caps.name("year")?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// First valid `YYYY-MM-DD` or month-name date (`March 10, 2021`) in the text
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    DATE_PATTERN
        .captures_iter(text)
        .find_map(|caps| date_from_captures(&caps))
}

/// First event category keyword in the text, `Documentation` when there is none
pub fn extract_event_type(text: &str) -> EventType {
    let caps = match EVENT_TYPE_PATTERN.captures(text) {
        Some(caps) => caps,
        None => return EventType::Documentation,
    };
    let groups = [
        ("diagnosis", EventType::Diagnosis),
        ("treatment", EventType::Treatment),
        ("medication", EventType::Medication),
        ("test", EventType::Test),
        ("surgery", EventType::Surgery),
        ("follow_up", EventType::FollowUp),
    ];
    groups
        .iter()
        .find(|(group, _)| caps.name(group).is_some())
        .map(|(_, event_type)| *event_type)
        .unwrap_or_default()
}

/// First severity keyword in the text, `Low` when there is none
pub fn extract_severity(text: &str) -> Severity {
    SEVERITY_PATTERN
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or_default()
}

/// Every `<name> <amount> <unit>` occurrence, e.g. `Metformin 500 mg`
pub fn extract_medications(text: &str) -> Vec<Medication> {
    MEDICATION_PATTERN
        .captures_iter(text)
        .map(|caps| Medication {
            name: caps["name"].to_string(),
            dosage: caps["dosage"].to_string(),
            frequency: DEFAULT_MEDICATION_FREQUENCY.to_string(),
        })
        .collect()
}

/// Every capitalized phrase ending in a condition suffix, e.g. `Cushing syndrome`
pub fn extract_conditions(text: &str) -> Vec<String> {
    CONDITION_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
