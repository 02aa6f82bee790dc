//! Dashboard configuration: where the tables and shapefiles live, and how maps
//! are framed and styled.

use crate::error::DashboardError;
use bon::bon;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_GEOMETRY_DIR: &str = "district_by_name";
pub const DEFAULT_AOI_PATH: &str = "punjabaoi/aoi_punjab.shp";
/// Lag tables compared against the historical series, in display order.
pub const DEFAULT_LAG_WINDOWS: [i64; 3] = [30, 14, 7];

/// Represents a geographical coordinate using latitude and longitude.
///
/// ```
/// use punjab_aqi::LatLon;
///
/// let lahore = LatLon(31.5204, 74.3587);
/// assert_eq!(lahore.0, 31.5204); // Latitude
/// assert_eq!(lahore.1, 74.3587); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

/// Initial framing of every map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub center: LatLon,
    pub zoom: u8,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: LatLon(30.9709, 72.4826),
            zoom: 7,
        }
    }
}

/// Style of a district layer. Stroke and fill share the district color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerStyle {
    pub weight: f64,
    pub fill_opacity: f64,
    pub opacity: f64,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            weight: 2.0,
            fill_opacity: 0.7,
            opacity: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory holding the CSV tables.
    pub data_dir: PathBuf,
    /// Directory of per-district shapefiles. Relative paths resolve against `data_dir`.
    pub geometry_dir: PathBuf,
    /// Area-of-interest boundary shapefile. Relative paths resolve against `data_dir`.
    pub aoi_path: PathBuf,
    pub map: MapSettings,
    pub layer_style: LayerStyle,
    /// Lags (in days) shown by the lag comparison, in order.
    pub lag_windows: Vec<i64>,
}

#[bon]
impl DashboardConfig {
    /// ```
    /// use punjab_aqi::DashboardConfig;
    ///
    /// let config = DashboardConfig::builder().data_dir("/srv/aqi").build();
    /// assert_eq!(config.geometry_path().to_str(), Some("/srv/aqi/district_by_name"));
    /// assert_eq!(config.map.zoom, 7);
    /// ```
    #[builder]
    pub fn new(
        #[builder(into)] data_dir: PathBuf,
        #[builder(into, default = PathBuf::from(DEFAULT_GEOMETRY_DIR))] geometry_dir: PathBuf,
        #[builder(into, default = PathBuf::from(DEFAULT_AOI_PATH))] aoi_path: PathBuf,
        #[builder(default)] map: MapSettings,
        #[builder(default)] layer_style: LayerStyle,
        #[builder(default = DEFAULT_LAG_WINDOWS.to_vec())] lag_windows: Vec<i64>,
    ) -> Self {
        Self {
            data_dir,
            geometry_dir,
            aoi_path,
            map,
            layer_style,
            lag_windows,
        }
    }

    /// Reads a JSON config. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// [`DashboardError::ConfigRead`] if the file cannot be read,
    /// [`DashboardError::ConfigParse`] if it is not a valid config.
    pub fn from_json_file(path: &Path) -> Result<Self, DashboardError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DashboardError::ConfigRead(path.to_path_buf(), e))?;
        serde_json::from_str(&text).map_err(|e| DashboardError::ConfigParse(path.to_path_buf(), e))
    }

    pub fn geometry_path(&self) -> PathBuf {
        self.data_dir.join(&self.geometry_dir)
    }

    pub fn aoi_file(&self) -> PathBuf {
        self.data_dir.join(&self.aoi_path)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::builder().data_dir(".").build()
    }
}
