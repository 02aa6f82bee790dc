//! Provides the `ForecastClient` for the forward-looking charts of one district.
//!
//! All views select a window from `start` (default [`now_local()`]) in the
//! pollutant forecast, restricted to one district, then resample it. The
//! district match is exact: pass the name as it appears in the tables, as
//! [`parse_district`](crate::parse_district) returns it.

use crate::classify::classification::classify;
use crate::resample::with_bounds;
use crate::tables::extractor::{extract_all_series, extract_bounds, extract_series};
use crate::time::now_local;
use crate::types::columns::AQI;
use crate::types::granularity::{Aggregation, Granularity, TimeWindow};
use crate::types::pollutant::Pollutant;
use crate::types::readings::{AqiBar, PollutantBounds, TimeSeries};
use crate::types::table_name::TableName;
use crate::{Dashboard, DashboardError, RenderCache};
use bon::bon;
use chrono::NaiveDateTime;
use polars::prelude::{DataFrame, IntoLazy};

/// Days covered by the hourly chart.
pub const HOURLY_DAYS: i64 = 30;
/// Days covered by the daily and bounds charts.
pub const DAILY_DAYS: i64 = 14;
/// Hours shown as AQI bars.
pub const AQI_BAR_HOURS: usize = 48;
/// Days covered by the last-year comparison.
pub const LAST_YEAR_DAYS: i64 = 60;
/// How far back the last-year comparison starts.
pub const LAST_YEAR_SHIFT_DAYS: i64 = 366;

/// Forward-looking charts of one district.
///
/// Instances are created by calling [`Dashboard::forecast()`]. Each method
/// starts a builder taking the render cache and the district; the optional
/// `.start(NaiveDateTime)` moves the window start away from the current hour.
/// Calling `.call()` loads what the chart needs and returns plain series.
///
/// A district that is absent from the forecast yields empty series, not an
/// error.
pub struct ForecastClient<'a> {
    dashboard: &'a Dashboard,
}

#[bon]
impl<'a> ForecastClient<'a> {
    pub(crate) fn new(dashboard: &'a Dashboard) -> Self {
        Self { dashboard }
    }

    fn resampled(
        &self,
        cache: &mut RenderCache,
        table: TableName,
        window: &TimeWindow,
        district: &str,
    ) -> Result<DataFrame, DashboardError> {
        Ok(self
            .dashboard
            .table(cache, table)?
            .select_window(window)
            .district(district)
            .resample(window.granularity, Aggregation::Mean)?)
    }

    /// Hourly mean of every field over 30 days, one series per field.
    ///
    /// Locations of the district are averaged per hour. Hours inside the
    /// covered range without any reading are kept with a `None` value.
    ///
    /// # Errors
    ///
    /// [`DashboardError::Table`] if the forecast table is missing or malformed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use punjab_aqi::{Dashboard, DashboardConfig, DashboardError, RenderCache};
    /// # fn main() -> Result<(), DashboardError> {
    /// let dashboard = Dashboard::new(DashboardConfig::builder().data_dir("/srv/aqi").build());
    /// let mut cache = RenderCache::new();
    ///
    /// let series = dashboard
    ///     .forecast()
    ///     .hourly(&mut cache, "Lahore") // Required: cache and district
    ///     .call()?;                     // Window starts at the current hour
    ///
    /// for s in &series {
    ///     println!("{}: {} points", s.name, s.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = hourly)]
    #[doc(hidden)]
    pub fn build_hourly(
        &self,
        #[builder(start_fn)] cache: &mut RenderCache,
        #[builder(start_fn)] district: &str,
        start: Option<NaiveDateTime>,
    ) -> Result<Vec<TimeSeries>, DashboardError> {
        let window = TimeWindow::from_days(
            start.unwrap_or_else(now_local),
            HOURLY_DAYS,
            Granularity::Hour,
        );
        let df = self.resampled(cache, TableName::ForecastPollutant, &window, district)?;
        Ok(extract_all_series(&df)?)
    }

    /// Daily mean of every field over 14 days, one series per field.
    #[builder(start_fn = daily)]
    #[doc(hidden)]
    pub fn build_daily(
        &self,
        #[builder(start_fn)] cache: &mut RenderCache,
        #[builder(start_fn)] district: &str,
        start: Option<NaiveDateTime>,
    ) -> Result<Vec<TimeSeries>, DashboardError> {
        let window = TimeWindow::from_days(
            start.unwrap_or_else(now_local),
            DAILY_DAYS,
            Granularity::Day,
        );
        let df = self.resampled(cache, TableName::ForecastPollutant, &window, district)?;
        Ok(extract_all_series(&df)?)
    }

    /// The first 48 hourly AQI values, each colored by its AQI category.
    /// Hours without a value have no color.
    #[builder(start_fn = hourly_aqi_bars)]
    #[doc(hidden)]
    pub fn build_hourly_aqi_bars(
        &self,
        #[builder(start_fn)] cache: &mut RenderCache,
        #[builder(start_fn)] district: &str,
        start: Option<NaiveDateTime>,
    ) -> Result<Vec<AqiBar>, DashboardError> {
        let window = TimeWindow::from_days(
            start.unwrap_or_else(now_local),
            HOURLY_DAYS,
            Granularity::Hour,
        );
        let df = self.resampled(cache, TableName::ForecastPollutant, &window, district)?;
        let series = extract_series(&df.head(Some(AQI_BAR_HOURS)), AQI, AQI)?;

        series
            .points
            .into_iter()
            .map(|point| {
                let color = point
                    .value
                    .map(|aqi| classify(Pollutant::Aqi, aqi))
                    .transpose()?
                    .map(|c| c.color);
                Ok::<_, DashboardError>(AqiBar {
                    time: point.time,
                    aqi: point.value,
                    color,
                })
            })
            .collect()
    }

    /// Hourly mean of one pollutant over 14 days with its ±10 % band.
    ///
    /// Selecting [`Pollutant::Aqi`] charts the weighted sum of the species
    /// rather than the stored index.
    ///
    /// # Errors
    ///
    /// [`DashboardError::Table`] if the forecast table is missing or malformed,
    /// [`DashboardError::Polars`] if the band cannot be computed.
    #[builder(start_fn = pollutant_bounds)]
    #[doc(hidden)]
    pub fn build_pollutant_bounds(
        &self,
        #[builder(start_fn)] cache: &mut RenderCache,
        #[builder(start_fn)] district: &str,
        #[builder(start_fn)] pollutant: Pollutant,
        start: Option<NaiveDateTime>,
    ) -> Result<PollutantBounds, DashboardError> {
        let window = TimeWindow::from_days(
            start.unwrap_or_else(now_local),
            DAILY_DAYS,
            Granularity::Hour,
        );
        let hourly = self.resampled(cache, TableName::ForecastPollutant, &window, district)?;
        let bounded = with_bounds(hourly.lazy(), pollutant).collect()?;
        Ok(PollutantBounds {
            district: district.to_string(),
            pollutant,
            points: extract_bounds(&bounded, pollutant.column_name())?,
        })
    }

    /// Hourly mean of every field over the 60 days starting 366 days before
    /// `start`, read from the previous year's readings.
    #[builder(start_fn = last_year)]
    #[doc(hidden)]
    pub fn build_last_year(
        &self,
        #[builder(start_fn)] cache: &mut RenderCache,
        #[builder(start_fn)] district: &str,
        start: Option<NaiveDateTime>,
    ) -> Result<Vec<TimeSeries>, DashboardError> {
        let window = TimeWindow::from_days(
            start.unwrap_or_else(now_local),
            LAST_YEAR_DAYS,
            Granularity::Hour,
        )
            .shifted_days(-LAST_YEAR_SHIFT_DAYS);
        let df = self.resampled(cache, TableName::LastYearPollutant, &window, district)?;
        Ok(extract_all_series(&df)?)
    }
}
