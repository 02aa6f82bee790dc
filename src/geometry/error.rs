use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("Geometry directory '{0}' does not exist")]
    MissingDirectory(PathBuf),

    #[error("Failed to scan geometry directory '{0}'")]
    Scan(PathBuf, #[source] walkdir::Error),

    #[error("District '{0}' is not in the geometry catalog")]
    NotInCatalog(String),

    #[error("Failed to read shapefile '{0}'")]
    Shapefile(PathBuf, #[source] shapefile::Error),
}
