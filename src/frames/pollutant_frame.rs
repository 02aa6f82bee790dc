//! Contains the `PollutantLazyFrame` structure for lazy operations on a
//! normalized forecast table.

use crate::filtering::PollutantFrameFilterExt;
use crate::resample::resample;
use crate::types::columns::{is_value_column, DISTRICT};
use crate::types::granularity::{Aggregation, Granularity, TimeWindow};
use chrono::NaiveDateTime;
use polars::prelude::*;

/// A wrapper around a Polars `LazyFrame` holding one normalized table.
///
/// The wrapped frame has a `date` column (`Datetime(ms)`, timezone-naive
/// Karachi wall-clock time), a `District` string column and any number of the
/// value columns, all `f64`. Obtain one with [`crate::Dashboard::table`].
///
/// Every selection method returns a new frame and leaves `self` untouched;
/// nothing is computed until [`PollutantLazyFrame::resample`],
/// [`PollutantLazyFrame::district_means`] or `frame.collect()` is called.
///
/// # Empty selections
///
/// Selecting a window with no rows, or a district that does not appear in
/// the table, yields an empty frame. It is never an error.
#[derive(Clone)]
pub struct PollutantLazyFrame {
    /// The underlying Polars LazyFrame.
    pub frame: LazyFrame,
}

impl PollutantLazyFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Filters the table with an arbitrary Polars predicate.
    ///
    /// ```rust
    /// # use punjab_aqi::PollutantLazyFrame;
    /// use polars::prelude::*;
    ///
    /// # fn main() -> Result<(), PolarsError> {
    /// let df = df!("District" => ["Lahore", "Multan"], "Aqi" => [180.0, 95.0])?;
    /// let unhealthy = PollutantLazyFrame::new(df.lazy()).filter(col("Aqi").gt(lit(150.0)));
    /// assert_eq!(unhealthy.frame.collect()?.height(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn filter(&self, predicate: Expr) -> PollutantLazyFrame {
        PollutantLazyFrame::new(self.frame.clone().filter(predicate))
    }

    /// Rows with `start <= date <= start + days`, optionally restricted to one
    /// district (exact, case-sensitive match).
    pub fn select(
        &self,
        start: NaiveDateTime,
        days: i64,
        district: Option<&str>,
    ) -> PollutantLazyFrame {
        let windowed = self.select_window(&TimeWindow::from_days(start, days, Granularity::Hour));
        match district {
            Some(district) => windowed.district(district),
            None => windowed,
        }
    }

    /// Rows inside a [`TimeWindow`], both ends inclusive.
    pub fn select_window(&self, window: &TimeWindow) -> PollutantLazyFrame {
        self.get_range(window.start, window.end)
    }

    /// Rows with `start <= date <= end`.
    pub fn get_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> PollutantLazyFrame {
        PollutantLazyFrame::new(self.frame.clone().filter_between(start, end))
    }

    /// Rows stamped exactly at `time`.
    pub fn get_at(&self, time: NaiveDateTime) -> PollutantLazyFrame {
        PollutantLazyFrame::new(self.frame.clone().filter_at(time))
    }

    /// Rows of one district.
    pub fn district(&self, district: &str) -> PollutantLazyFrame {
        PollutantLazyFrame::new(self.frame.clone().filter_district(district))
    }

    /// Buckets the selection to `granularity`; see [`crate::resample()`].
    pub fn resample(
        &self,
        granularity: Granularity,
        aggregation: Aggregation,
    ) -> PolarsResult<DataFrame> {
        resample(self.frame.clone(), granularity, aggregation)
    }

    /// One row per district with the mean of every value column, sorted by
    /// district name.
    pub fn district_means(&self) -> PolarsResult<DataFrame> {
        let mut frame = self.frame.clone();
        let schema = frame.collect_schema()?;
        let means: Vec<Expr> = schema
            .iter_names()
            .filter(|name| is_value_column(name.as_str()))
            .map(|name| col(name.clone()).mean())
            .collect();

        frame
            .group_by([col(DISTRICT)])
            .agg(means)
            .sort([DISTRICT], SortMultipleOptions::default())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::extractor::naive_from_millis;
    use crate::test_support::{forecast_frame, hour};
    use crate::types::columns::DATE;

    fn frame() -> PollutantLazyFrame {
        PollutantLazyFrame::new(forecast_frame().lazy())
    }

    #[test]
    fn test_select_one_district_inside_window() -> PolarsResult<()> {
        let df = frame().select(hour(5, 15), 1, Some("Lahore")).frame.collect()?;

        assert_eq!(df.height(), 2);
        let districts = df.column(DISTRICT)?.str()?;
        assert!(districts.into_iter().all(|d| d == Some("Lahore")));
        for ms in df.column(DATE)?.datetime()?.into_iter().flatten() {
            let time = naive_from_millis(ms).unwrap();
            assert!(time >= hour(5, 15) && time <= hour(6, 15));
        }
        Ok(())
    }

    #[test]
    fn test_unknown_district_is_empty_not_error() -> PolarsResult<()> {
        let df = frame().select(hour(5, 0), 30, Some("Atlantis")).frame.collect()?;
        assert_eq!(df.height(), 0);
        Ok(())
    }

    #[test]
    fn test_window_before_data_is_empty() -> PolarsResult<()> {
        let window = TimeWindow::from_days(hour(1, 0), 2, Granularity::Hour);
        assert_eq!(frame().select_window(&window).frame.collect()?.height(), 0);
        Ok(())
    }

    #[test]
    fn test_district_means_at_one_hour() -> PolarsResult<()> {
        let df = frame().get_at(hour(5, 14)).district_means()?;

        assert_eq!(df.height(), 2);
        assert_eq!(df.column(DISTRICT)?.str()?.get(0), Some("Lahore"));
        assert_eq!(df.column("Aqi")?.f64()?.get(0), Some(100.0));
        assert_eq!(df.column("Aqi")?.f64()?.get(1), Some(80.0));
        assert!(df.column("Location_id").is_err());
        Ok(())
    }
}
