use crate::geometry::error::GeometryError;
use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use log::{debug, info};
use shapefile::dbase::{FieldValue, Record};
use shapefile::{PolygonRing, Reader, Shape};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Attribute holding the display name of a district shape.
const LABEL_FIELD: &str = "district";

/// The district shapefiles available for drawing, keyed by file stem
/// (`Dera_Ghazi_Khan.shp` → `Dera_Ghazi_Khan`).
#[derive(Debug, Clone)]
pub struct GeometryCatalog {
    root: PathBuf,
    entries: BTreeMap<String, PathBuf>,
}

/// A district outline read from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictGeometry {
    pub key: String,
    /// The `district` attribute of the first record, when present.
    pub label: Option<String>,
    pub shape: MultiPolygon<f64>,
}

impl GeometryCatalog {
    /// Collects every `*.shp` file below `dir`. The key is the file name up to
    /// its first `.`; when two files share a key the first in name order wins.
    pub fn scan(dir: &Path) -> Result<Self, GeometryError> {
        if !dir.is_dir() {
            return Err(GeometryError::MissingDirectory(dir.to_path_buf()));
        }

        let mut entries = BTreeMap::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| GeometryError::Scan(dir.to_path_buf(), e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            if !file_name.ends_with(".shp") {
                continue;
            }
            if let Some(key) = file_name.split('.').next().filter(|k| !k.is_empty()) {
                entries
                    .entry(key.to_string())
                    .or_insert_with(|| entry.path().to_path_buf());
            }
        }

        info!("Found {} district geometries in {:?}", entries.len(), dir);
        Ok(Self {
            root: dir.to_path_buf(),
            entries,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn path(&self, key: &str) -> Option<&Path> {
        self.entries.get(key).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads the outline of one district, merging all its shapes.
    pub fn load_district(&self, key: &str) -> Result<DistrictGeometry, GeometryError> {
        let path = self
            .path(key)
            .ok_or_else(|| GeometryError::NotInCatalog(key.to_string()))?;

        let shapes = read_polygons(path)?;
        let label = shapes.iter().find_map(|(_, label)| label.clone());
        let shape = MultiPolygon(
            shapes
                .into_iter()
                .flat_map(|(shape, _)| shape.0)
                .collect(),
        );
        Ok(DistrictGeometry {
            key: key.to_string(),
            label,
            shape,
        })
    }
}

/// Reads every polygon record of a shapefile, with its `district` attribute.
/// Non-polygon shapes are skipped.
pub fn read_polygons(
    path: &Path,
) -> Result<Vec<(MultiPolygon<f64>, Option<String>)>, GeometryError> {
    let shapefile_error = |e: shapefile::Error| GeometryError::Shapefile(path.to_path_buf(), e);
    let mut reader = Reader::from_path(path).map_err(shapefile_error)?;

    let mut polygons = Vec::new();
    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result.map_err(shapefile_error)?;
        let multipolygon = match shape {
            Shape::Polygon(p) => rings_to_multipolygon(p.rings(), |pt| Coord { x: pt.x, y: pt.y }),
            Shape::PolygonM(p) => rings_to_multipolygon(p.rings(), |pt| Coord { x: pt.x, y: pt.y }),
            Shape::PolygonZ(p) => rings_to_multipolygon(p.rings(), |pt| Coord { x: pt.x, y: pt.y }),
            other => {
                debug!("Skipping {:?} shape in {:?}", other.shapetype(), path);
                continue;
            }
        };
        polygons.push((multipolygon, label(&record)));
    }
    Ok(polygons)
}

fn label(record: &Record) -> Option<String> {
    match record.get(LABEL_FIELD) {
        Some(FieldValue::Character(Some(s))) => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Groups shapefile rings into polygons: each outer ring owns the inner rings
/// that follow it.
fn rings_to_multipolygon<P>(
    rings: &[PolygonRing<P>],
    coord: impl Fn(&P) -> Coord<f64>,
) -> MultiPolygon<f64> {
    let mut polygons = Vec::new();
    let mut exterior: Option<LineString<f64>> = None;
    let mut holes = Vec::new();

    for ring in rings {
        let line: LineString<f64> = ring.points().iter().map(&coord).collect();
        match ring {
            PolygonRing::Outer(_) => {
                if let Some(previous) = exterior.replace(line) {
                    polygons.push(Polygon::new(previous, std::mem::take(&mut holes)));
                }
            }
            PolygonRing::Inner(_) => holes.push(line),
        }
    }
    if let Some(last) = exterior {
        polygons.push(Polygon::new(last, holes));
    }
    MultiPolygon(polygons)
}
