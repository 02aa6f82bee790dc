use crate::config::{LatLon, LayerStyle, MapSettings};
use crate::geometry::catalog::{read_polygons, GeometryCatalog};
use crate::geometry::error::GeometryError;
use crate::geometry::join::DistrictColorAssignment;
use geo_types::MultiPolygon;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use log::{info, warn};
use serde::Serialize;
use serde_json::json;
use std::path::Path;

/// A map ready to draw: the area-of-interest outline plus one colored feature
/// per district.
#[derive(Debug, Clone, Serialize)]
pub struct ChoroplethMap {
    pub center: LatLon,
    pub zoom: u8,
    /// Province outline, drawn under the districts. `None` when the file is absent.
    pub boundary: Option<FeatureCollection>,
    pub districts: FeatureCollection,
}

fn feature(shape: &MultiPolygon<f64>, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::from(shape))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Reads the boundary layer. A missing file is logged and yields `None`; a
/// file that exists but cannot be read is an error.
pub fn load_boundary(path: &Path) -> Result<Option<FeatureCollection>, GeometryError> {
    if !path.is_file() {
        warn!("Area of interest boundary {:?} not found; drawing districts only", path);
        return Ok(None);
    }
    let features = read_polygons(path)?
        .iter()
        .map(|(shape, label)| {
            let mut properties = JsonObject::new();
            if let Some(label) = label {
                properties.insert("district".to_string(), json!(label));
            }
            feature(shape, properties)
        })
        .collect();
    Ok(Some(collection(features)))
}

/// Renders a joined assignment to GeoJSON.
///
/// Each feature carries `district` (the shapefile label, falling back to the
/// key), `key`, `fill_color` and a Leaflet-style `style` object.
pub fn render_choropleth(
    joined: &DistrictColorAssignment,
    catalog: &GeometryCatalog,
    aoi: &Path,
    settings: &MapSettings,
    style: &LayerStyle,
) -> Result<ChoroplethMap, GeometryError> {
    let mut features = Vec::with_capacity(joined.len());
    for (key, color) in joined.iter() {
        let district = catalog.load_district(key)?;
        let mut properties = JsonObject::new();
        properties.insert(
            "district".to_string(),
            json!(district.label.as_deref().unwrap_or(key)),
        );
        properties.insert("key".to_string(), json!(key));
        properties.insert("fill_color".to_string(), json!(color));
        properties.insert(
            "style".to_string(),
            json!({
                "fillColor": color,
                "color": color,
                "weight": style.weight,
                "fillOpacity": style.fill_opacity,
                "opacity": style.opacity,
            }),
        );
        features.push(feature(&district.shape, properties));
    }
    info!("Rendered choropleth with {} districts", features.len());

    Ok(ChoroplethMap {
        center: settings.center,
        zoom: settings.zoom,
        boundary: load_boundary(aoi)?,
        districts: collection(features),
    })
}
