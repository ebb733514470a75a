use chrono::prelude::*;
use chrono::Months;
use chrono_tz::Tz;

pub const MINUTE_MILLIS: i64 = 1000 * 60;
pub const DAY_MILLIS: i64 = MINUTE_MILLIS * 60 * 24;

/// Zeroes the seconds and milliseconds of a millisecond timestamp
pub fn truncate_to_minute(ts: i64) -> i64 {
    ts - ts.rem_euclid(MINUTE_MILLIS)
}

pub fn is_same_minute(ts1: i64, ts2: i64) -> bool {
    truncate_to_minute(ts1) == truncate_to_minute(ts2)
}

pub fn to_datetime(ts: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    Utc.timestamp_millis_opt(ts)
        .single()
        .map(|dt| dt.with_timezone(tz))
}

/// The calendar date of `ts` in the given timezone
pub fn date_of(ts: i64, tz: &Tz) -> Option<NaiveDate> {
    to_datetime(ts, tz).map(|dt| dt.date_naive())
}

/// Finds the first instant strictly after `now` which falls on `day` of a
/// month at `hour`:00 local time.
pub fn next_monthly_run(now: &DateTime<Tz>, day: u32, hour: u32) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    let start_of_month = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)?;

    // Scanning a couple of months covers days that do not exist in every month
    for months_ahead in 0..3 {
        let month = start_of_month.checked_add_months(Months::new(months_ahead))?;
        let date = match month.with_day(day) {
            Some(d) => d,
            None => continue,
        };
        let candidate = tz
            .from_local_datetime(&date.and_hms_opt(hour, 0, 0)?)
            .earliest();
        if let Some(candidate) = candidate {
            if candidate > *now {
                return Some(candidate);
            }
        }
    }
    None
}
