//! Provides the `CurrentClient` for views of the present hour across all districts.

use crate::classify::ranking::{rank, RankedDistrict};
use crate::tables::extractor::extract_readings;
use crate::time::now_local;
use crate::types::granularity::Granularity;
use crate::types::readings::DistrictReading;
use crate::types::table_name::TableName;
use crate::{Dashboard, DashboardError, RenderCache};
use bon::bon;
use chrono::NaiveDateTime;
use log::debug;
use serde::Serialize;

/// The cleanest and the most polluted district of one hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestAndWorst {
    pub best: RankedDistrict,
    pub worst: RankedDistrict,
}

/// Views of one hour of the pollutant forecast across all districts.
///
/// Obtained via [`Dashboard::current()`]. Every view reads the hour containing
/// `at`, which defaults to [`now_local()`].
pub struct CurrentClient<'a> {
    dashboard: &'a Dashboard,
}

#[bon]
impl<'a> CurrentClient<'a> {
    pub(crate) fn new(dashboard: &'a Dashboard) -> Self {
        Self { dashboard }
    }

    /// Mean of every field per district at one hour, sorted by district.
    ///
    /// Locations of a district are averaged. An hour missing from the
    /// forecast yields an empty list.
    ///
    /// # Errors
    ///
    /// [`DashboardError::Table`] if the forecast table is unavailable.
    #[builder(start_fn = district_snapshot)]
    #[doc(hidden)]
    pub fn build_district_snapshot(
        &self,
        #[builder(start_fn)] cache: &mut RenderCache,
        at: Option<NaiveDateTime>,
    ) -> Result<Vec<DistrictReading>, DashboardError> {
        let at = Granularity::Hour.bucket_start(at.unwrap_or_else(now_local));
        let means = self
            .dashboard
            .table(cache, TableName::ForecastPollutant)?
            .get_at(at)
            .district_means()?;
        let readings = extract_readings(&means)?;
        debug!("Snapshot at {} covers {} districts", at, readings.len());
        Ok(readings)
    }

    /// Districts ordered by ascending AQI with their ranking colors.
    ///
    /// `offset` and `limit` page through the ranking (the page shows five rows,
    /// then the rest on request); ranks and colors always refer to the full
    /// ranking.
    #[builder(start_fn = ranking_table)]
    #[doc(hidden)]
    pub fn build_ranking_table(
        &self,
        #[builder(start_fn)] cache: &mut RenderCache,
        at: Option<NaiveDateTime>,
        #[builder(default)] offset: usize,
        limit: Option<usize>,
    ) -> Result<Vec<RankedDistrict>, DashboardError> {
        let snapshot = self.build_district_snapshot(cache, at)?;
        let ranked = rank(snapshot.into_iter().map(|r| (r.district, r.aqi)));
        Ok(ranked
            .into_iter()
            .skip(offset)
            .take(limit.unwrap_or(usize::MAX))
            .collect())
    }

    /// Lowest and highest AQI district, or `None` when no district has an AQI
    /// at that hour.
    #[builder(start_fn = best_and_worst)]
    #[doc(hidden)]
    pub fn build_best_and_worst(
        &self,
        #[builder(start_fn)] cache: &mut RenderCache,
        at: Option<NaiveDateTime>,
    ) -> Result<Option<BestAndWorst>, DashboardError> {
        let ranked: Vec<RankedDistrict> = self
            .build_ranking_table(cache, at, 0, None)?
            .into_iter()
            .filter(|r| r.aqi.is_some())
            .collect();
        Ok(match (ranked.first(), ranked.last()) {
            (Some(best), Some(worst)) => Some(BestAndWorst {
                best: best.clone(),
                worst: worst.clone(),
            }),
            _ => None,
        })
    }
}
