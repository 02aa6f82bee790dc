use crate::classify::error::ClassifyError;
use crate::geometry::error::GeometryError;
use crate::tables::error::TableError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("Unknown district '{0}'")]
    UnknownDistrict(String),

    #[error("Failed to read config file '{0}'")]
    ConfigRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}'")]
    ConfigParse(PathBuf, #[source] serde_json::Error),

    #[error("Failed processing DataFrame: {0}")]
    Polars(#[from] PolarsError),
}

impl DashboardError {
    /// True when the source data behind a view is missing or malformed, as
    /// opposed to an invalid selection. Hosts render these as "data unavailable"
    /// for the affected view only.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            DashboardError::Table(_) | DashboardError::Geometry(_) | DashboardError::Polars(_)
        )
    }
}
