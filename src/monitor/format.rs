use chrono::{DateTime, Utc};
use std::time::Duration;

/// Offset subtracted from durations before clock-formatting them.
const DATE_OFFSET: i64 = 3600;

/// Time of day, e.g. "14:03:59".
pub fn clock_time(at: DateTime<Utc>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Full date and time, e.g. "06-Aug-2026 14:03:59".
pub fn full_date(at: DateTime<Utc>) -> String {
    at.format("%d-%b-%Y %H:%M:%S").to_string()
}

/// Clock-format a duration by treating (duration - one hour) as a time of
/// day. A 4h lifetime renders "03:00:00" and a 30m one "23:30:00".
///
/// This reuses a time-of-day format to display an elapsed time - a display
/// quirk kept for output compatibility, not a real timestamp.
pub fn elapsed_clock(elapsed: Duration) -> String {
    let shifted = elapsed.as_secs() as i64 - DATE_OFFSET;
    match DateTime::<Utc>::from_timestamp(shifted, 0) {
        Some(at) => clock_time(at),
        None => clock_time(DateTime::<Utc>::UNIX_EPOCH),
    }
}

/// Whole seconds, e.g. "30s".
pub fn whole_seconds(elapsed: Duration) -> String {
    format!("{}s", elapsed.as_secs())
}

/// Two decimal places, e.g. "0.25".
pub fn decimal(value: f64) -> String {
    format!("{:.2}", value)
}

/// Seconds with two decimals, e.g. "1.50s".
pub fn seconds(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}
