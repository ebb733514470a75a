mod extract_timeline_events;
mod get_timeline;
mod get_timeline_stats;

use crate::error::MediscanError;
use actix_web::web;
use extract_timeline_events::extract_timeline_events_controller;
use get_timeline::get_timeline_controller;
use get_timeline_stats::get_timeline_stats_controller;
use mediscan_api_structs::TimelineQueryParams;
use mediscan_domain::{
    timeline::{filter_value, ALL_HOSPITALS, ALL_SEVERITIES, ALL_TYPES},
    DateRange, EventType, Severity, TimelineFilter,
};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/timeline/extract",
        web::post().to(extract_timeline_events_controller),
    );
    cfg.route("/timeline", web::get().to(get_timeline_controller));
    cfg.route("/timeline/stats", web::get().to(get_timeline_stats_controller));
}

fn parse_timeline_filter(query: &TimelineQueryParams) -> Result<TimelineFilter, MediscanError> {
    let event_type = match filter_value(query.event_type.as_deref(), ALL_TYPES) {
        Some(value) => Some(value.parse::<EventType>().map_err(|e| {
            MediscanError::BadClientData(format!("Invalid eventType filter. {}", e))
        })?),
        None => None,
    };
    let severity = match filter_value(query.severity.as_deref(), ALL_SEVERITIES) {
        Some(value) => Some(value.parse::<Severity>().map_err(|e| {
            MediscanError::BadClientData(format!("Invalid severity filter. {}", e))
        })?),
        None => None,
    };
    let hospital = filter_value(query.hospital.as_deref(), ALL_HOSPITALS).map(String::from);

    Ok(TimelineFilter {
        date_range: DateRange::new(query.start_date, query.end_date),
        event_type,
        severity,
        hospital,
    })
}
