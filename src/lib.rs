mod classify;
mod clients;
mod config;
mod dashboard;
mod error;
mod filtering;
mod frames;
mod geometry;
mod resample;
mod tables;
mod time;
mod types;

#[cfg(test)]
mod test_support;

pub use config::*;
pub use dashboard::Dashboard;
pub use error::DashboardError;
pub use time::*;

pub use clients::current_client::*;
pub use clients::forecast_client::*;
pub use clients::history_client::*;
pub use clients::map_client::*;

pub use frames::pollutant_frame::PollutantLazyFrame;
pub use filtering::PollutantFrameFilterExt;
pub use resample::{resample, with_bounds};

pub use tables::loader::TableLoader;
pub use tables::render_cache::RenderCache;
pub use tables::source::{CsvTableSource, TableSource};

pub use classify::classification::*;
pub use classify::legend::*;
pub use classify::ranking::*;

pub use geometry::catalog::{read_polygons, DistrictGeometry, GeometryCatalog};
pub use geometry::choropleth::{load_boundary, render_choropleth, ChoroplethMap};
pub use geometry::join::{join, DistrictColorAssignment};

pub use types::columns::{AQI, DATE, DISTRICT, LOCATION_ID, VALUE_COLUMNS};
pub use types::district::{normalize_district_key, parse_district, DISTRICTS};
pub use types::granularity::*;
pub use types::pollutant::Pollutant;
pub use types::readings::*;
pub use types::table_name::TableName;

pub use classify::error::ClassifyError;
pub use geometry::error::GeometryError;
pub use tables::error::TableError;
