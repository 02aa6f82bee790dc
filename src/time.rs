//! Resolves the "current hour" every view is anchored to.
//!
//! Forecast tables are indexed by Pakistan Standard Time wall-clock hours,
//! stored without a timezone. Asia/Karachi has been a fixed UTC+05:00 offset
//! with no daylight saving since 2009, so the conversion is a plain shift.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};

/// Offset of Asia/Karachi from UTC.
pub const KARACHI_UTC_OFFSET_HOURS: i64 = 5;

/// Current wall-clock hour in Asia/Karachi, minutes and seconds zeroed.
pub fn now_local() -> NaiveDateTime {
    local_hour_at(Utc::now())
}

/// Current calendar date in Asia/Karachi.
pub fn today_local() -> NaiveDate {
    now_local().date()
}

/// Karachi wall-clock hour containing the given instant.
///
/// ```rust
/// use punjab_aqi::local_hour_at;
/// use chrono::{TimeZone, Utc};
///
/// let instant = Utc.with_ymd_and_hms(2024, 11, 5, 20, 47, 13).unwrap();
/// assert_eq!(local_hour_at(instant).to_string(), "2024-11-06 01:00:00");
/// ```
pub fn local_hour_at(instant: DateTime<Utc>) -> NaiveDateTime {
    truncate_to_hour(instant.naive_utc() + Duration::hours(KARACHI_UTC_OFFSET_HOURS))
}

pub(crate) fn truncate_to_hour(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp
        - Duration::minutes(i64::from(timestamp.minute()))
        - Duration::seconds(i64::from(timestamp.second()))
        - Duration::nanoseconds(i64::from(timestamp.nanosecond()))
}
