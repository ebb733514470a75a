use crate::medical_event::{EventType, MedicalEvent, Severity};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Filter values clients send to mean "do not filter on this field"
pub const ALL_TYPES: &str = "All Types";
pub const ALL_SEVERITIES: &str = "All Severities";
pub const ALL_HOSPITALS: &str = "All Hospitals";

/// Returns `None` for empty values and the given "match everything" sentinel
pub fn filter_value<'a>(value: Option<&'a str>, match_all: &str) -> Option<&'a str> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty() && *v != match_all)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Only a range with both bounds filters anything
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<Self> {
        Some(Self {
            start: start?,
            end: end?,
        })
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.start <= *date && *date <= self.end
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineFilter {
    pub date_range: Option<DateRange>,
    pub event_type: Option<EventType>,
    pub severity: Option<Severity>,
    pub hospital: Option<String>,
}

impl TimelineFilter {
    pub fn matches(&self, event: &MedicalEvent) -> bool {
        if let Some(range) = &self.date_range {
            if !range.contains(&event.event_date) {
                return false;
            }
        }
        if let Some(event_type) = self.event_type {
            if event.event_type != event_type {
                return false;
            }
        }
        if let Some(severity) = self.severity {
            if event.severity != severity {
                return false;
            }
        }
        match &self.hospital {
            Some(hospital) => event.hospital.eq_ignore_ascii_case(hospital.trim()),
            None => true,
        }
    }
}

/// Newest event date first. Events of the same date keep the order in
/// which they were extracted, with later documents first.
pub fn sort_events(events: &mut [MedicalEvent]) {
    events.sort_by(|e1, e2| {
        e2.event_date
            .cmp(&e1.event_date)
            .then(e2.created.cmp(&e1.created))
            .then(e1.sequence.cmp(&e2.sequence))
    });
}

/// Year -> zero based month -> events
pub type GroupedTimeline = BTreeMap<i32, BTreeMap<u32, Vec<MedicalEvent>>>;

/// Groups events by year and zero based month, keeping the order of `events`
/// within every group.
pub fn group_by_year_month(events: Vec<MedicalEvent>) -> GroupedTimeline {
    let mut grouped = GroupedTimeline::new();
    for event in events {
        grouped
            .entry(event.event_date.year())
            .or_default()
            .entry(event.event_date.month0())
            .or_default()
            .push(event);
    }
    grouped
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSeverityCount {
    pub event_type: EventType,
    pub severity: Severity,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MedicationStat {
    pub name: String,
    pub occurrences: usize,
    pub last_prescribed: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineStats {
    pub by_type_severity: Vec<TypeSeverityCount>,
    pub medications: Vec<MedicationStat>,
}

pub fn compute_stats(events: &[MedicalEvent]) -> TimelineStats {
    let mut counts: BTreeMap<(EventType, Severity), usize> = BTreeMap::new();
    let mut medications: BTreeMap<&str, (usize, NaiveDate)> = BTreeMap::new();

    for event in events {
        *counts.entry((event.event_type, event.severity)).or_default() += 1;
        for medication in &event.medications {
            let stat = medications
                .entry(medication.name.as_str())
                .or_insert((0, event.event_date));
            stat.0 += 1;
            stat.1 = stat.1.max(event.event_date);
        }
    }

    TimelineStats {
        by_type_severity: counts
            .into_iter()
            .map(|((event_type, severity), count)| TypeSeverityCount {
                event_type,
                severity,
                count,
            })
            .collect(),
        medications: medications
            .into_iter()
            .map(|(name, (occurrences, last_prescribed))| MedicationStat {
                name: name.to_string(),
                occurrences,
                last_prescribed,
            })
            .collect(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{medical_event::Medication, MedicalEventCandidate, ID};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(
        event_date: NaiveDate,
        event_type: EventType,
        severity: Severity,
        hospital: &str,
    ) -> MedicalEvent {
        MedicalEventCandidate {
            event_date,
            event_type,
            description: "event".into(),
            severity,
            related_conditions: vec![],
            medications: vec![],
            sequence: 0,
        }
        .into_event(ID::new(), ID::new(), hospital, 0)
    }

    fn medication(name: &str) -> Medication {
        Medication {
            name: name.into(),
            dosage: "5 mg".into(),
            frequency: "Daily".into(),
        }
    }

    #[test]
    fn sentinel_filter_values_are_ignored() {
        assert_eq!(filter_value(Some(ALL_TYPES), ALL_TYPES), None);
        assert_eq!(filter_value(Some(""), ALL_TYPES), None);
        assert_eq!(filter_value(None, ALL_TYPES), None);
        assert_eq!(filter_value(Some(" Test "), ALL_TYPES), Some("Test"));
    }

    #[test]
    fn date_range_needs_both_bounds() {
        assert!(DateRange::new(Some(date(2023, 1, 1)), None).is_none());
        let range = DateRange::new(Some(date(2023, 1, 1)), Some(date(2023, 1, 31))).unwrap();
        assert!(range.contains(&date(2023, 1, 1)));
        assert!(range.contains(&date(2023, 1, 31)));
        assert!(!range.contains(&date(2023, 2, 1)));
    }

    #[test]
    fn filter_matches_all_criteria() {
        let e = event(date(2023, 5, 10), EventType::Test, Severity::High, "City Hospital");
        assert!(TimelineFilter::default().matches(&e));

        let filter = TimelineFilter {
            date_range: DateRange::new(Some(date(2023, 5, 1)), Some(date(2023, 5, 31))),
            event_type: Some(EventType::Test),
            severity: Some(Severity::High),
            hospital: Some("city hospital".into()),
        };
        assert!(filter.matches(&e));

        let filter = TimelineFilter {
            severity: Some(Severity::Low),
            ..Default::default()
        };
        assert!(!filter.matches(&e));

        let filter = TimelineFilter {
            hospital: Some("Other Clinic".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&e));
    }

    #[test]
    fn it_sorts_newest_first() {
        let mut first_line = event(date(2023, 5, 10), EventType::Test, Severity::Low, "");
        first_line.created = 10;
        let mut second_line = first_line.clone();
        second_line.sequence = 1;
        let mut newer_document = first_line.clone();
        newer_document.created = 20;
        let older = event(date(2022, 1, 1), EventType::Test, Severity::Low, "");

        let mut events = vec![
            older.clone(),
            second_line.clone(),
            first_line.clone(),
            newer_document.clone(),
        ];
        sort_events(&mut events);
        assert_eq!(events, vec![newer_document, first_line, second_line, older]);
    }

    #[test]
    fn it_groups_by_year_and_zero_based_month() {
        let events = vec![
            event(date(2023, 5, 10), EventType::Test, Severity::Low, ""),
            event(date(2023, 5, 1), EventType::Surgery, Severity::Low, ""),
            event(date(2023, 1, 31), EventType::Test, Severity::Low, ""),
            event(date(2021, 12, 24), EventType::Test, Severity::Low, ""),
        ];
        let grouped = group_by_year_month(events);
        assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), vec![2021, 2023]);
        assert_eq!(grouped[&2021].keys().copied().collect::<Vec<_>>(), vec![11]);
        assert_eq!(grouped[&2023].keys().copied().collect::<Vec<_>>(), vec![0, 4]);
        let may = &grouped[&2023][&4];
        assert_eq!(may.len(), 2);
        assert_eq!(may[0].event_type, EventType::Test);
        assert_eq!(may[1].event_type, EventType::Surgery);
    }

    #[test]
    fn it_computes_stats() {
        let mut e1 = event(date(2023, 5, 10), EventType::Medication, Severity::Low, "");
        e1.medications = vec![medication("Metformin"), medication("Aspirin")];
        let mut e2 = event(date(2023, 7, 1), EventType::Medication, Severity::Low, "");
        e2.medications = vec![medication("Metformin")];
        let e3 = event(date(2023, 8, 1), EventType::Diagnosis, Severity::High, "");

        let stats = compute_stats(&[e2, e1, e3]);
        assert_eq!(
            stats.by_type_severity,
            vec![
                TypeSeverityCount {
                    event_type: EventType::Diagnosis,
                    severity: Severity::High,
                    count: 1
                },
                TypeSeverityCount {
                    event_type: EventType::Medication,
                    severity: Severity::Low,
                    count: 2
                },
            ]
        );
        assert_eq!(
            stats.medications,
            vec![
                MedicationStat {
                    name: "Aspirin".into(),
                    occurrences: 1,
                    last_prescribed: date(2023, 5, 10)
                },
                MedicationStat {
                    name: "Metformin".into(),
                    occurrences: 2,
                    last_prescribed: date(2023, 7, 1)
                },
            ]
        );
    }
}
