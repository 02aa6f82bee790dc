use crate::tables::extractor::millis_from_naive;
use crate::types::columns::{DATE, DISTRICT};
use chrono::NaiveDateTime;
use polars::prelude::{col, lit, DataType, Expr, LazyFrame, TimeUnit};

pub(crate) fn datetime_lit(time: NaiveDateTime) -> Expr {
    lit(millis_from_naive(time)).cast(DataType::Datetime(TimeUnit::Milliseconds, None))
}

pub trait PollutantFrameFilterExt {
    /// Keeps rows whose `date` lies in `[start, end]`, both ends inclusive.
    ///
    /// An inverted interval (`start > end`) yields an empty frame rather than an error.
    fn filter_between(self, start: NaiveDateTime, end: NaiveDateTime) -> LazyFrame;

    /// Keeps rows whose `date` equals `time` exactly.
    fn filter_at(self, time: NaiveDateTime) -> LazyFrame;

    /// Keeps rows of one district. The match is exact and case-sensitive, so an
    /// unknown name yields an empty frame.
    fn filter_district(self, district: &str) -> LazyFrame;
}

impl PollutantFrameFilterExt for LazyFrame {
    fn filter_between(self, start: NaiveDateTime, end: NaiveDateTime) -> LazyFrame {
        self.filter(
            col(DATE)
                .gt_eq(datetime_lit(start))
                .and(col(DATE).lt_eq(datetime_lit(end))),
        )
    }

    fn filter_at(self, time: NaiveDateTime) -> LazyFrame {
        self.filter(col(DATE).eq(datetime_lit(time)))
    }

    fn filter_district(self, district: &str) -> LazyFrame {
        self.filter(col(DISTRICT).eq(lit(district)))
    }
}
