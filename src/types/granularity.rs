//! Defines the resampling granularity and reduction method, plus the derived
//! [`TimeWindow`] a view covers.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use polars::prelude::Expr;
use serde::Serialize;
use std::fmt;

/// Time resolution that raw readings are bucketed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Granularity {
    /// Buckets start at the top of every hour.
    Hour,
    /// Buckets start at midnight.
    Day,
}

impl Granularity {
    /// Polars duration string for the bucket width.
    pub(crate) fn every(&self) -> &'static str {
        match self {
            Granularity::Hour => "1h",
            Granularity::Day => "1d",
        }
    }

    /// Bucket width in milliseconds, the unit of the normalized `date` column.
    pub(crate) fn step_millis(&self) -> i64 {
        match self {
            Granularity::Hour => 3_600_000,
            Granularity::Day => 86_400_000,
        }
    }

    /// Aligns a timestamp down to the start of its bucket.
    ///
    /// ```rust
    /// use punjab_aqi::Granularity;
    /// use chrono::NaiveDate;
    ///
    /// let t = NaiveDate::from_ymd_opt(2024, 11, 5).unwrap().and_hms_opt(14, 35, 10).unwrap();
    /// assert_eq!(Granularity::Hour.bucket_start(t).to_string(), "2024-11-05 14:00:00");
    /// assert_eq!(Granularity::Day.bucket_start(t).to_string(), "2024-11-05 00:00:00");
    /// ```
    pub fn bucket_start(&self, timestamp: NaiveDateTime) -> NaiveDateTime {
        match self {
            Granularity::Hour => crate::time::truncate_to_hour(timestamp),
            Granularity::Day => timestamp.date().and_time(NaiveTime::MIN),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Hour => write!(f, "hourly"),
            Granularity::Day => write!(f, "daily"),
        }
    }
}

/// How the values inside one bucket are reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Aggregation {
    /// Average of the non-missing values. Used by every forecast view.
    Mean,
    /// Largest value. Used by the lag and historical views.
    Max,
}

impl Aggregation {
    pub(crate) fn apply(&self, expr: Expr) -> Expr {
        match self {
            Aggregation::Mean => expr.mean(),
            Aggregation::Max => expr.max(),
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregation::Mean => write!(f, "mean"),
            Aggregation::Max => write!(f, "max"),
        }
    }
}

/// A closed interval `[start, end]` and the granularity it is viewed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub granularity: Granularity,
}

impl TimeWindow {
    /// Window covering `days` days from `start`, both ends inclusive.
    pub fn from_days(start: NaiveDateTime, days: i64, granularity: Granularity) -> Self {
        Self {
            start,
            end: start + Duration::days(days),
            granularity,
        }
    }

    /// Shifts both ends by `days` (negative moves into the past).
    pub fn shifted_days(&self, days: i64) -> Self {
        Self {
            start: self.start + Duration::days(days),
            end: self.end + Duration::days(days),
            granularity: self.granularity,
        }
    }
}
