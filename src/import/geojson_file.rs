//! GeoJSON boundary import.

use geojson::{Geometry, Value};
use serde_json::Value as JsonValue;

use super::boundary_polygon;

/// Extracts a boundary polygon from GeoJSON text.
///
/// Accepts a `FeatureCollection` (the first feature with `Polygon` geometry
/// wins), a single `Feature` with `Polygon` geometry, or a bare `Polygon`.
/// The result holds only the outer ring, closed if the file left it open;
/// interior rings are dropped. Returns `None` for invalid JSON, any other
/// shape, or a polygon whose outer ring has fewer than three distinct vertices.
///
/// # Examples
///
/// ```
/// use parcel::import::parse_geojson;
///
/// let text = r#"{
///     "type": "Feature",
///     "properties": { "name": "Hayfield" },
///     "geometry": {
///         "type": "Polygon",
///         "coordinates": [[[-72.0, 44.0], [-72.0, 44.001], [-71.999, 44.001], [-72.0, 44.0]]]
///     }
/// }"#;
/// assert!(parse_geojson(text).is_some());
/// assert!(parse_geojson(r#"{ "type": "Point", "coordinates": [-72.0, 44.0] }"#).is_none());
/// ```
pub fn parse_geojson(text: &str) -> Option<Geometry> {
    let value: JsonValue = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            log::debug!("GeoJSON import is not valid JSON: {}", e);
            return None;
        }
    };

    let Some(polygon) = find_polygon(&value) else {
        log::debug!("GeoJSON import contains no Polygon geometry");
        return None;
    };

    let geometry = match Geometry::from_json_value(polygon.clone()) {
        Ok(geometry) => geometry,
        Err(e) => {
            log::debug!("GeoJSON polygon is malformed: {}", e);
            return None;
        }
    };

    let Value::Polygon(mut rings) = geometry.value else {
        return None;
    };
    if rings.is_empty() {
        log::debug!("GeoJSON polygon has no rings");
        return None;
    }
    if rings.len() > 1 {
        log::debug!("Dropping {} interior ring(s) from imported polygon", rings.len() - 1);
    }

    boundary_polygon(rings.swap_remove(0))
}

fn type_of(value: &JsonValue) -> Option<&str> {
    value.get("type").and_then(JsonValue::as_str)
}

fn is_polygon(value: &JsonValue) -> bool {
    type_of(value) == Some("Polygon")
}

/// The polygon geometry object within a FeatureCollection, Feature, or bare geometry.
fn find_polygon(value: &JsonValue) -> Option<&JsonValue> {
    match type_of(value)? {
        "FeatureCollection" => value
            .get("features")?
            .as_array()?
            .iter()
            .filter_map(|feature| feature.get("geometry"))
            .find(|geometry| is_polygon(geometry)),
        "Feature" => value.get("geometry").filter(|geometry| is_polygon(geometry)),
        "Polygon" => Some(value),
        _ => None,
    }
}
