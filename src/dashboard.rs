//! The main entry point: a [`Dashboard`] ties a configuration to a table
//! source and hands out the view clients.

use crate::clients::current_client::CurrentClient;
use crate::clients::forecast_client::ForecastClient;
use crate::clients::history_client::HistoryClient;
use crate::clients::map_client::MapClient;
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::frames::pollutant_frame::PollutantLazyFrame;
use crate::geometry::catalog::GeometryCatalog;
use crate::tables::loader::TableLoader;
use crate::tables::render_cache::RenderCache;
use crate::tables::source::{CsvTableSource, TableSource};
use crate::types::table_name::TableName;
use log::info;
use std::path::Path;

/// Builds every view of the air quality dashboard.
///
/// A `Dashboard` holds no data itself. Each view method takes the caller's
/// [`RenderCache`], so tables are read at most once per render and sessions
/// never share state. Call [`RenderCache::begin_render`] before each render.
///
/// # Examples
///
/// ```no_run
/// use punjab_aqi::{Dashboard, DashboardConfig, DashboardError, RenderCache};
///
/// # fn main() -> Result<(), DashboardError> {
/// let dashboard = Dashboard::new(DashboardConfig::builder().data_dir("/srv/aqi").build());
/// let mut cache = RenderCache::new();
///
/// cache.begin_render();
/// let ranking = dashboard.current().ranking_table(&mut cache).limit(5).call()?;
/// for district in ranking {
///     println!("{} {} {:?}", district.ranking, district.district, district.aqi);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Dashboard {
    config: DashboardConfig,
    loader: TableLoader,
}

impl Dashboard {
    /// Creates a dashboard reading CSV tables from `config.data_dir`.
    pub fn new(config: DashboardConfig) -> Self {
        let source = CsvTableSource::new(&config.data_dir);
        Self::with_source(config, source)
    }

    /// Creates a dashboard reading tables from a custom [`TableSource`].
    pub fn with_source(config: DashboardConfig, source: impl TableSource + 'static) -> Self {
        info!(
            "Dashboard created (data: {:?}, geometry: {:?})",
            config.data_dir,
            config.geometry_path()
        );
        Self {
            config,
            loader: TableLoader::new(source),
        }
    }

    /// Creates a dashboard from a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, DashboardError> {
        Ok(Self::new(DashboardConfig::from_json_file(path)?))
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Loads a normalized table through the render cache.
    pub fn table(
        &self,
        cache: &mut RenderCache,
        table: TableName,
    ) -> Result<PollutantLazyFrame, DashboardError> {
        Ok(self.loader.load(cache, table)?)
    }

    /// The district geometry catalog, scanned once per render.
    pub fn catalog<'c>(
        &self,
        cache: &'c mut RenderCache,
    ) -> Result<&'c GeometryCatalog, DashboardError> {
        Ok(cache.catalog(&self.config.geometry_path())?)
    }

    /// Views of the current hour: snapshot, ranking, best and worst district.
    pub fn current(&self) -> CurrentClient<'_> {
        CurrentClient::new(self)
    }

    /// Forward-looking views of one district.
    pub fn forecast(&self) -> ForecastClient<'_> {
        ForecastClient::new(self)
    }

    /// Lag comparison and long-range AQI views of one district.
    pub fn history(&self) -> HistoryClient<'_> {
        HistoryClient::new(self)
    }

    /// District color mappings and choropleth layers.
    pub fn maps(&self) -> MapClient<'_> {
        MapClient::new(self)
    }
}
