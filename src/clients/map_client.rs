//! Provides the `MapClient`, which colors districts for the choropleth maps.
//!
//! Every color view returns a [`DistrictColorAssignment`] already joined with
//! the geometry catalog, so each key can be drawn. Pass it to
//! [`MapClient::choropleth`] to get the GeoJSON layers.

use crate::classify::classification::classify;
use crate::geometry::choropleth::{render_choropleth, ChoroplethMap};
use crate::geometry::join::{join, DistrictColorAssignment};
use crate::types::pollutant::Pollutant;
use crate::{Dashboard, DashboardError, RenderCache};
use bon::bon;
use chrono::NaiveDateTime;

/// Color assignments and GeoJSON layers for the district maps.
///
/// Instances are created by calling [`Dashboard::maps()`]. The color views
/// read the same hour as [`Dashboard::current()`] and accept the same
/// optional `.at(NaiveDateTime)`.
pub struct MapClient<'a> {
    dashboard: &'a Dashboard,
}

#[bon]
impl<'a> MapClient<'a> {
    pub(crate) fn new(dashboard: &'a Dashboard) -> Self {
        Self { dashboard }
    }

    fn joined(
        &self,
        cache: &mut RenderCache,
        assignment: &DistrictColorAssignment,
    ) -> Result<DistrictColorAssignment, DashboardError> {
        let catalog = self.dashboard.catalog(cache)?;
        Ok(join(assignment, catalog))
    }

    /// Districts colored by the category of their mean AQI at `at`.
    ///
    /// # Errors
    ///
    /// [`DashboardError::Table`] if the forecast table is unavailable,
    /// [`DashboardError::Geometry`] if the district shapefiles cannot be read.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use punjab_aqi::{Dashboard, DashboardConfig, DashboardError, RenderCache};
    /// # fn main() -> Result<(), DashboardError> {
    /// let dashboard = Dashboard::new(DashboardConfig::builder().data_dir("/srv/aqi").build());
    /// let mut cache = RenderCache::new();
    /// let maps = dashboard.maps();
    ///
    /// let colors = maps.aqi_colors(&mut cache).call()?; // Current hour
    /// let map = maps.choropleth(&mut cache, &colors)?;
    /// println!("{} districts drawn", map.districts.features.len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = aqi_colors)]
    #[doc(hidden)]
    pub fn build_aqi_colors(
        &self,
        #[builder(start_fn)] cache: &mut RenderCache,
        at: Option<NaiveDateTime>,
    ) -> Result<DistrictColorAssignment, DashboardError> {
        self.build_pollutant_colors(cache, Pollutant::Aqi, at)
    }

    /// Districts colored by the category of their mean `pollutant` value at
    /// `at`. Districts without a value are left out.
    #[builder(start_fn = pollutant_colors)]
    #[doc(hidden)]
    pub fn build_pollutant_colors(
        &self,
        #[builder(start_fn)] cache: &mut RenderCache,
        #[builder(start_fn)] pollutant: Pollutant,
        at: Option<NaiveDateTime>,
    ) -> Result<DistrictColorAssignment, DashboardError> {
        let snapshot = self
            .dashboard
            .current()
            .build_district_snapshot(cache, at)?;

        let mut assignment = DistrictColorAssignment::new();
        for reading in &snapshot {
            if let Some(value) = reading.value(pollutant) {
                assignment.insert(&reading.district, classify(pollutant, value)?.color);
            }
        }
        self.joined(cache, &assignment)
    }

    /// Districts colored by their place in the AQI ranking.
    #[builder(start_fn = ranking_colors)]
    #[doc(hidden)]
    pub fn build_ranking_colors(
        &self,
        #[builder(start_fn)] cache: &mut RenderCache,
        at: Option<NaiveDateTime>,
    ) -> Result<DistrictColorAssignment, DashboardError> {
        let assignment: DistrictColorAssignment = self
            .dashboard
            .current()
            .build_ranking_table(cache, at, 0, None)?
            .into_iter()
            .map(|ranked| (ranked.district, ranked.color))
            .collect();
        self.joined(cache, &assignment)
    }

    /// Renders an assignment with the configured framing, layer style and
    /// area-of-interest outline. Districts without geometry are dropped.
    ///
    /// # Errors
    ///
    /// [`DashboardError::Geometry`] if a district shapefile or an existing
    /// boundary file cannot be read. A missing boundary file is not an error.
    pub fn choropleth(
        &self,
        cache: &mut RenderCache,
        assignment: &DistrictColorAssignment,
    ) -> Result<ChoroplethMap, DashboardError> {
        let config = self.dashboard.config();
        let catalog = self.dashboard.catalog(cache)?;
        let joined = join(assignment, catalog);
        Ok(render_choropleth(
            &joined,
            catalog,
            &config.aoi_file(),
            &config.map,
            &config.layer_style,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::DEFAULT_GEOMETRY_DIR;
    use crate::geometry::catalog::tests::write_square;
    use crate::test_support::{hour, write_fixture_tables};
    use crate::{Dashboard, DashboardConfig, Pollutant, RenderCache};
    use serde_json::json;
    use tempfile::TempDir;

    fn dashboard(dir: &TempDir) -> Result<Dashboard, Box<dyn std::error::Error>> {
        write_fixture_tables(dir.path())?;
        let geometry = dir.path().join(DEFAULT_GEOMETRY_DIR);
        std::fs::create_dir(&geometry)?;
        write_square(&geometry, "Dera_Ghazi_Khan", "Dera Ghazi Khan", 0.0);
        write_square(&geometry, "Multan", "Multan", 2.0);
        Ok(Dashboard::new(
            DashboardConfig::builder().data_dir(dir.path()).build(),
        ))
    }

    #[test]
    fn test_aqi_colors_use_geometry_keys() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let dashboard = dashboard(&dir)?;
        let mut cache = RenderCache::new();

        let colors = dashboard.maps().aqi_colors(&mut cache).at(hour(5, 14)).call()?;

        // Lahore has readings but no shapefile.
        assert_eq!(colors.len(), 1);
        assert_eq!(colors.get("Dera_Ghazi_Khan"), Some("#00E400"));
        assert_eq!(colors.get("Lahore"), None);
        Ok(())
    }

    #[test]
    fn test_pollutant_colors() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let dashboard = dashboard(&dir)?;
        let mut cache = RenderCache::new();

        let colors = dashboard
            .maps()
            .pollutant_colors(&mut cache, Pollutant::Pm25)
            .at(hour(5, 14))
            .call()?;
        // Pm_25 = 30 in Dera Ghazi Khan.
        assert_eq!(colors.get("Dera Ghazi Khan"), Some("#FFC0CB"));
        Ok(())
    }

    #[test]
    fn test_ranking_colors() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let dashboard = dashboard(&dir)?;
        let mut cache = RenderCache::new();

        let colors = dashboard.maps().ranking_colors(&mut cache).at(hour(5, 14)).call()?;
        assert_eq!(colors.get("Dera_Ghazi_Khan"), Some("#00FF00"));
        Ok(())
    }

    #[test]
    fn test_choropleth_uses_config() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let dashboard = dashboard(&dir)?;
        let mut cache = RenderCache::new();

        let maps = dashboard.maps();
        let colors = maps.aqi_colors(&mut cache).at(hour(5, 14)).call()?;
        let map = maps.choropleth(&mut cache, &colors)?;

        assert_eq!(map.center, dashboard.config().map.center);
        assert!(map.boundary.is_none());
        assert_eq!(map.districts.features.len(), 1);
        let properties = map.districts.features[0].properties.as_ref().unwrap();
        assert_eq!(properties["district"], json!("Dera Ghazi Khan"));
        assert_eq!(properties["style"]["weight"], json!(2.0));
        Ok(())
    }
}
