//! Conversion between boundary rings and GeoJSON `Polygon` geometries.
//!
//! GeoJSON positions are `[lng, lat]` and polygon rings are explicitly closed.
//! Rings produced here always have exactly one (outer) ring; holes are not
//! modelled.

use crate::error::{ParcelError, Result};
use crate::spatial::{closed_ring, is_closed};
use crate::types::GeoPoint;
use geojson::{Geometry, Position, Value};

/// Minimum positions in a closed outer ring: three vertices plus the closing point.
pub const MIN_RING_POSITIONS: usize = 4;

/// Converts a ring into a closed, single-ring GeoJSON polygon.
///
/// # Examples
///
/// ```
/// use parcel::GeoPoint;
/// use parcel::geojson::ring_to_geojson;
///
/// let ring = [
///     GeoPoint::new(44.0, -72.0),
///     GeoPoint::new(44.001, -72.0),
///     GeoPoint::new(44.001, -71.999),
/// ];
/// let polygon = ring_to_geojson(&ring);
/// let json = serde_json::to_value(&polygon).unwrap();
/// assert_eq!(json["type"], "Polygon");
/// assert_eq!(json["coordinates"][0][0], serde_json::json!([-72.0, 44.0]));
/// assert_eq!(json["coordinates"][0].as_array().unwrap().len(), 4);
/// ```
pub fn ring_to_geojson(ring: &[GeoPoint]) -> Geometry {
    let exterior: Vec<Position> = closed_ring(ring)
        .iter()
        .map(GeoPoint::to_position)
        .collect();
    Geometry::new(Value::Polygon(vec![exterior]))
}

/// Builds a polygon from GeoJSON-ordered positions, closing the ring if needed.
pub fn polygon_from_positions(mut exterior: Vec<Position>) -> Geometry {
    let needs_closing = match (exterior.first(), exterior.last()) {
        (Some(first), Some(last)) => first != last,
        _ => false,
    };
    if needs_closing {
        exterior.push(exterior[0].clone());
    }
    Geometry::new(Value::Polygon(vec![exterior]))
}

/// Extracts the outer ring of a GeoJSON polygon as open `GeoPoint`s.
///
/// The closing position is dropped. Anything other than a polygon with an
/// outer ring of at least four `[lng, lat]` positions is a [`ParcelError::Format`].
///
/// # Examples
///
/// ```
/// use parcel::GeoPoint;
/// use parcel::geojson::{geojson_to_ring, ring_to_geojson};
///
/// let ring = vec![
///     GeoPoint::new(44.0, -72.0),
///     GeoPoint::new(44.001, -72.0),
///     GeoPoint::new(44.001, -71.999),
/// ];
/// assert_eq!(geojson_to_ring(&ring_to_geojson(&ring)).unwrap(), ring);
/// ```
pub fn geojson_to_ring(geometry: &Geometry) -> Result<Vec<GeoPoint>> {
    let rings = match &geometry.value {
        Value::Polygon(rings) => rings,
        other => {
            return Err(ParcelError::Format(format!(
                "Expected a Polygon geometry, got {}",
                geometry_type(other)
            )));
        }
    };

    let exterior = rings
        .first()
        .ok_or_else(|| ParcelError::Format("Polygon must have at least one ring".to_string()))?;

    if rings.len() > 1 {
        log::debug!("Ignoring {} interior ring(s)", rings.len() - 1);
    }

    let points = positions_to_points(exterior)?;
    if points.len() < MIN_RING_POSITIONS {
        return Err(ParcelError::Format(format!(
            "Polygon ring needs at least {} positions, got {}",
            MIN_RING_POSITIONS,
            points.len()
        )));
    }

    let mut points = points;
    if is_closed(&points) {
        points.pop();
    } else {
        log::warn!("Polygon ring is not closed; keeping all {} positions", points.len());
    }
    Ok(points)
}

pub(crate) fn geometry_type(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

/// Maps `[lng, lat, ...]` positions to points, rejecting short or non-finite positions.
pub fn positions_to_points(positions: &[Position]) -> Result<Vec<GeoPoint>> {
    positions
        .iter()
        .enumerate()
        .map(|(idx, position)| match position.as_slice() {
            [lng, lat, ..] if lng.is_finite() && lat.is_finite() => {
                Ok(GeoPoint::from_lng_lat(*lng, *lat))
            }
            [_, _, ..] => Err(ParcelError::Format(format!(
                "Position at index {} has non-finite values",
                idx
            ))),
            _ => Err(ParcelError::Format(format!(
                "Position at index {} must have at least 2 values",
                idx
            ))),
        })
        .collect()
}

/// Serializes a ring as a GeoJSON polygon string.
pub fn ring_to_geojson_string(ring: &[GeoPoint]) -> Result<String> {
    Ok(serde_json::to_string(&ring_to_geojson(ring))?)
}

/// Parses a GeoJSON polygon string into an open ring.
///
/// Invalid JSON, a missing `coordinates` member, or a non-polygon geometry are
/// all errors; this is for data that is expected to be a stored boundary.
pub fn ring_from_geojson_str(json: &str) -> Result<Vec<GeoPoint>> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| ParcelError::Format(format!("Failed to parse GeoJSON: {}", e)))?;
    ring_from_json_value(&value)
}

/// Converts an already parsed JSON value holding a polygon into an open ring.
pub fn ring_from_json_value(value: &serde_json::Value) -> Result<Vec<GeoPoint>> {
    let object = value
        .as_object()
        .ok_or_else(|| ParcelError::Format("GeoJSON geometry must be an object".to_string()))?;

    if !object.contains_key("coordinates") {
        return Err(ParcelError::Format(
            "GeoJSON geometry is missing `coordinates`".to_string(),
        ));
    }

    let geometry = Geometry::from_json_value(value.clone())
        .map_err(|e| ParcelError::Format(format!("Invalid GeoJSON geometry: {}", e)))?;
    geojson_to_ring(&geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(44.0, -72.0),
            GeoPoint::new(44.0021, -72.0003),
            GeoPoint::new(44.0025, -71.9971),
            GeoPoint::new(44.0008, -71.9962),
        ]
    }

    fn exterior(geometry: &Geometry) -> &Vec<Position> {
        match &geometry.value {
            Value::Polygon(rings) => {
                assert_eq!(rings.len(), 1);
                &rings[0]
            }
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn test_ring_to_geojson_closes_and_swaps_order() {
        let ring = field();
        let polygon = ring_to_geojson(&ring);
        let positions = exterior(&polygon);

        assert_eq!(positions.len(), ring.len() + 1);
        assert_eq!(positions[0], vec![-72.0, 44.0]);
        assert_eq!(positions.first(), positions.last());
    }

    #[test]
    fn test_pre_closed_ring_is_not_closed_twice() {
        let closed = closed_ring(&field());
        let polygon = ring_to_geojson(&closed);
        assert_eq!(exterior(&polygon).len(), closed.len());
    }

    #[test]
    fn test_roundtrip_open_and_closed() {
        let ring = field();
        assert_eq!(geojson_to_ring(&ring_to_geojson(&ring)).unwrap(), ring);
        assert_eq!(
            geojson_to_ring(&ring_to_geojson(&closed_ring(&ring))).unwrap(),
            ring
        );
    }

    #[test]
    fn test_string_roundtrip() {
        let ring = field();
        let json = ring_to_geojson_string(&ring).unwrap();
        assert!(json.contains("\"Polygon\""));
        assert_eq!(ring_from_geojson_str(&json).unwrap(), ring);
    }

    #[test]
    fn test_rejects_non_polygon() {
        let point = Geometry::new(Value::Point(vec![-72.0, 44.0]));
        assert!(matches!(
            geojson_to_ring(&point),
            Err(ParcelError::Format(_))
        ));
    }

    #[test]
    fn test_rejects_empty_and_short_rings() {
        let empty = Geometry::new(Value::Polygon(vec![]));
        assert!(geojson_to_ring(&empty).is_err());

        let no_positions = Geometry::new(Value::Polygon(vec![vec![]]));
        assert!(geojson_to_ring(&no_positions).is_err());

        let triangle_unclosed = Geometry::new(Value::Polygon(vec![vec![
            vec![-72.0, 44.0],
            vec![-72.0, 44.001],
            vec![-71.999, 44.001],
        ]]));
        assert!(geojson_to_ring(&triangle_unclosed).is_err());
    }

    #[test]
    fn test_rejects_short_position() {
        let polygon = Geometry::new(Value::Polygon(vec![vec![
            vec![-72.0, 44.0],
            vec![-72.0],
            vec![-71.999, 44.001],
            vec![-72.0, 44.0],
        ]]));
        let err = geojson_to_ring(&polygon).unwrap_err().to_string();
        assert!(err.contains("index 1"), "unexpected message: {err}");
    }

    #[test]
    fn test_missing_coordinates_is_hard_failure() {
        let value = json!({ "type": "Polygon" });
        assert!(matches!(
            ring_from_json_value(&value),
            Err(ParcelError::Format(_))
        ));
        assert!(ring_from_geojson_str("not json").is_err());
        assert!(ring_from_geojson_str("[1, 2]").is_err());
    }

    #[test]
    fn test_altitude_is_ignored() {
        let value = json!({
            "type": "Polygon",
            "coordinates": [[[-72.0, 44.0, 100.0], [-72.0, 44.001, 101.0], [-71.999, 44.001, 99.0], [-72.0, 44.0, 100.0]]]
        });
        let ring = ring_from_json_value(&value).unwrap();
        assert_eq!(ring.len(), 3);
        assert_eq!(ring[1], GeoPoint::new(44.001, -72.0));
    }

    #[test]
    fn test_polygon_from_positions_closes_ring() {
        let polygon = polygon_from_positions(vec![
            vec![-72.0, 44.0],
            vec![-72.0, 44.001],
            vec![-71.999, 44.001],
        ]);
        let positions = exterior(&polygon);
        assert_eq!(positions.len(), 4);
        assert_eq!(positions[3], vec![-72.0, 44.0]);
    }
}
