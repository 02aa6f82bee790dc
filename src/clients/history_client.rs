//! Provides the `HistoryClient` for the daily AQI comparisons of one district.

use crate::frames::pollutant_frame::PollutantLazyFrame;
use crate::tables::extractor::extract_series;
use crate::time::today_local;
use crate::types::columns::AQI;
use crate::types::granularity::{Aggregation, Granularity, TimeWindow};
use crate::types::readings::TimeSeries;
use crate::types::table_name::TableName;
use crate::{Dashboard, DashboardError, RenderCache};
use bon::bon;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use log::warn;
use polars::prelude::IntoLazy;
use serde::Serialize;

/// Days of observed history shown next to the lag series.
pub const HISTORICAL_DAYS: i64 = 30;

/// Segments of the long-range forecast as `(first day, last day)` offsets
/// from today, both inclusive.
pub const FUTURE_SEGMENTS: [(i64, i64); 3] = [(0, 7), (8, 14), (15, 60)];

/// The long-range forecast split by horizon, plus the whole range as one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FutureForecast {
    pub combined: TimeSeries,
    pub segments: Vec<TimeSeries>,
}

/// Daily AQI comparisons of one district: forecast drift and the long-range
/// outlook.
///
/// Instances are created by calling [`Dashboard::history()`]. Both views take
/// an optional `.today(NaiveDate)`, defaulting to the current date in Pakistan
/// Standard Time.
pub struct HistoryClient<'a> {
    dashboard: &'a Dashboard,
}

fn midnight(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

fn segment_name(first: i64, last: i64) -> String {
    format!("Day {first} to Day {last}")
}

#[bon]
impl<'a> HistoryClient<'a> {
    pub(crate) fn new(dashboard: &'a Dashboard) -> Self {
        Self { dashboard }
    }

    /// Daily maximum AQI of one district from `table`, limited to `[from, to]`.
    fn daily_max(
        &self,
        cache: &mut RenderCache,
        table: TableName,
        district: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
        name: String,
    ) -> Result<TimeSeries, DashboardError> {
        let window = TimeWindow {
            start: from,
            end: to,
            granularity: Granularity::Day,
        };
        let daily = self
            .dashboard
            .table(cache, table)?
            .district(district)
            .resample(window.granularity, Aggregation::Max)?;
        let df = PollutantLazyFrame::new(daily.lazy())
            .select_window(&window)
            .frame
            .collect()?;
        Ok(extract_series(&df, name, AQI)?)
    }

    /// Forecast drift: the daily maximum AQI as forecast N days ahead, for
    /// each configured lag, followed by the observed history.
    ///
    /// Lag N covers `[today - N, today]`; the observed series covers the last
    /// 30 days. Series are named `Day N` and `Historical`. Lags without a
    /// table are skipped with a warning.
    ///
    /// # Errors
    ///
    /// [`DashboardError::Table`] if a lag table or the historical table is
    /// missing or malformed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use punjab_aqi::{Dashboard, DashboardConfig, DashboardError, RenderCache};
    /// # use chrono::NaiveDate;
    /// # fn main() -> Result<(), DashboardError> {
    /// let dashboard = Dashboard::new(DashboardConfig::builder().data_dir("/srv/aqi").build());
    /// let mut cache = RenderCache::new();
    ///
    /// let series = dashboard
    ///     .history()
    ///     .lag_comparison(&mut cache, "Multan")
    ///     .today(NaiveDate::from_ymd_opt(2024, 11, 5).unwrap()) // Optional
    ///     .call()?;
    /// assert_eq!(series.last().map(|s| s.name.as_str()), Some("Historical"));
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = lag_comparison)]
    #[doc(hidden)]
    pub fn build_lag_comparison(
        &self,
        #[builder(start_fn)] cache: &mut RenderCache,
        #[builder(start_fn)] district: &str,
        today: Option<NaiveDate>,
    ) -> Result<Vec<TimeSeries>, DashboardError> {
        let today = midnight(today.unwrap_or_else(today_local));
        let mut series = Vec::new();

        for &days in &self.dashboard.config().lag_windows {
            let Some(table) = TableName::for_lag_days(days) else {
                warn!("No lag table for {} days, skipping", days);
                continue;
            };
            series.push(self.daily_max(
                cache,
                table,
                district,
                today - Duration::days(days),
                today,
                format!("Day {days}"),
            )?);
        }

        series.push(self.daily_max(
            cache,
            TableName::ReadyHistorical,
            district,
            today - Duration::days(HISTORICAL_DAYS),
            today,
            "Historical".to_string(),
        )?);
        Ok(series)
    }

    /// The 60-day AQI forecast as daily maxima, split into the next week,
    /// the week after and the remainder.
    #[builder(start_fn = future_forecast)]
    #[doc(hidden)]
    pub fn build_future_forecast(
        &self,
        #[builder(start_fn)] cache: &mut RenderCache,
        #[builder(start_fn)] district: &str,
        today: Option<NaiveDate>,
    ) -> Result<FutureForecast, DashboardError> {
        let today = midnight(today.unwrap_or_else(today_local));

        let mut segments = Vec::with_capacity(FUTURE_SEGMENTS.len());
        for (first, last) in FUTURE_SEGMENTS {
            segments.push(self.daily_max(
                cache,
                TableName::AqiForecast,
                district,
                today + Duration::days(first),
                today + Duration::days(last),
                segment_name(first, last),
            )?);
        }

        let (first, last) = (FUTURE_SEGMENTS[0].0, FUTURE_SEGMENTS[FUTURE_SEGMENTS.len() - 1].1);
        let combined = TimeSeries::new(
            segment_name(first, last),
            segments.iter().flat_map(|s| s.points.iter().copied()).collect(),
        );
        Ok(FutureForecast { combined, segments })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{hour, write_fixture_tables};
    use crate::{parse_district, Dashboard, DashboardConfig, RenderCache};
    use chrono::{Duration, NaiveDate};
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 5).unwrap()
    }

    #[test]
    fn test_lag_comparison_windows() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        write_fixture_tables(dir.path())?;
        let dashboard = Dashboard::new(DashboardConfig::builder().data_dir(dir.path()).build());
        let mut cache = RenderCache::new();

        let series = dashboard
            .history()
            .lag_comparison(&mut cache, "Lahore")
            .today(today())
            .call()?;

        let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Day 30", "Day 14", "Day 7", "Historical"]);
        assert_eq!(series[0].len(), 31);
        assert_eq!(series[1].len(), 15);
        assert_eq!(series[2].len(), 8);
        assert_eq!(series[3].len(), 31);

        let day_7 = &series[2];
        assert_eq!(day_7.points[0].time, hour(5, 0) - Duration::days(7));
        assert_eq!(day_7.points[0].value, Some(207.0));
        assert_eq!(day_7.value_at(hour(5, 0)), Some(200.0));
        // Four tables, each read once.
        assert_eq!(cache.len(), 4);
        Ok(())
    }

    #[test]
    fn test_unknown_lag_is_skipped() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        write_fixture_tables(dir.path())?;
        let config = DashboardConfig::builder()
            .data_dir(dir.path())
            .lag_windows(vec![21, 7])
            .build();
        let dashboard = Dashboard::new(config);

        let series = dashboard
            .history()
            .lag_comparison(&mut RenderCache::new(), "Multan")
            .today(today())
            .call()?;
        let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Day 7", "Historical"]);
        assert_eq!(series[0].value_at(hour(5, 0)), Some(100.0));
        Ok(())
    }

    #[test]
    fn test_future_forecast_segments() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        write_fixture_tables(dir.path())?;
        let dashboard = Dashboard::new(DashboardConfig::builder().data_dir(dir.path()).build());

        let future = dashboard
            .history()
            .future_forecast(&mut RenderCache::new(), "Lahore")
            .today(today())
            .call()?;

        let lengths: Vec<usize> = future.segments.iter().map(|s| s.len()).collect();
        assert_eq!(lengths, [8, 7, 46]);
        assert_eq!(future.segments[1].name, "Day 8 to Day 14");
        assert_eq!(future.segments[1].points[0].value, Some(8.0));
        assert_eq!(future.combined.name, "Day 0 to Day 60");
        assert_eq!(future.combined.len(), 61);
        assert_eq!(future.combined.points[60].value, Some(60.0));
        Ok(())
    }

    #[test]
    fn test_district_without_forecast_has_empty_segments() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        write_fixture_tables(dir.path())?;
        let dashboard = Dashboard::new(DashboardConfig::builder().data_dir(dir.path()).build());

        let future = dashboard
            .history()
            .future_forecast(&mut RenderCache::new(), "Multan")
            .today(today())
            .call()?;
        assert!(future.combined.is_empty());
        assert!(future.segments.iter().all(|s| s.is_empty()));
        Ok(())
    }

    #[test]
    fn test_parsed_district_selects_lag_rows() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        write_fixture_tables(dir.path())?;
        let dashboard = Dashboard::new(DashboardConfig::builder().data_dir(dir.path()).build());
        let mut cache = RenderCache::new();

        for selection in ["Lahore", "Multan"] {
            let district = parse_district(selection)?;
            let series = dashboard
                .history()
                .lag_comparison(&mut cache, district)
                .today(today())
                .call()?;
            assert!(!series[0].is_empty(), "{selection} selects no rows");
        }
        Ok(())
    }
}
