//! Validation for geographic coordinates and boundary rings.

use crate::error::{ParcelError, Result};
use crate::spatial::open_ring;
use crate::types::GeoPoint;

/// Validates a point has a finite latitude in [-90, 90] and longitude in [-180, 180].
///
/// # Examples
///
/// ```
/// use parcel::GeoPoint;
/// use parcel::validation::validate_geographic_point;
///
/// assert!(validate_geographic_point(&GeoPoint::new(44.0, -72.0)).is_ok());
/// assert!(validate_geographic_point(&GeoPoint::new(95.0, -72.0)).is_err());
/// assert!(validate_geographic_point(&GeoPoint::new(44.0, 200.0)).is_err());
/// ```
pub fn validate_geographic_point(point: &GeoPoint) -> Result<()> {
    check_ordinate("Latitude", point.lat(), 90.0)?;
    check_ordinate("Longitude", point.lng(), 180.0)
}

fn check_ordinate(name: &str, value: f64, limit: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ParcelError::InvalidInput(format!(
            "{} must be finite, got: {}",
            name, value
        )));
    }
    if value.abs() > limit {
        return Err(ParcelError::InvalidInput(format!(
            "{} {} is outside [-{}, {}]",
            name, value, limit, limit
        )));
    }
    Ok(())
}

/// Validates every point, reporting the index of the first bad one.
pub fn validate_points(points: &[GeoPoint]) -> Result<()> {
    for (idx, point) in points.iter().enumerate() {
        validate_geographic_point(point)
            .map_err(|e| ParcelError::InvalidInput(format!("Point at index {}: {}", idx, e)))?;
    }
    Ok(())
}

/// Validates every point has finite ordinates, without range checks.
pub fn validate_finite_points(points: &[GeoPoint]) -> Result<()> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(idx) => Err(ParcelError::InvalidInput(format!(
            "Point at index {} has non-finite coordinates",
            idx
        ))),
        None => Ok(()),
    }
}

/// Validates a ring has at least 3 distinct vertices once any closing point
/// is ignored.
pub fn validate_ring_vertices(ring: &[GeoPoint]) -> Result<()> {
    let vertices = open_ring(ring);
    let mut distinct: Vec<GeoPoint> = Vec::with_capacity(vertices.len());
    for point in vertices {
        if !distinct.contains(point) {
            distinct.push(*point);
        }
    }

    if distinct.len() < 3 {
        return Err(ParcelError::InvalidInput(format!(
            "Boundary ring needs at least 3 distinct points, got {}",
            distinct.len()
        )));
    }

    Ok(())
}

/// Validates a boundary ring: valid coordinates and at least 3 distinct
/// vertices.
///
/// # Examples
///
/// ```
/// use parcel::GeoPoint;
/// use parcel::validation::validate_ring;
///
/// let a = GeoPoint::new(44.0, -72.0);
/// let b = GeoPoint::new(44.001, -72.0);
/// let c = GeoPoint::new(44.001, -71.999);
///
/// assert!(validate_ring(&[a, b, c]).is_ok());
/// assert!(validate_ring(&[a, b, a]).is_err());
/// ```
pub fn validate_ring(ring: &[GeoPoint]) -> Result<()> {
    validate_points(ring)?;
    validate_ring_vertices(ring)
}

/// Validates an earth radius used for spherical calculations.
///
/// # Examples
///
/// ```
/// use parcel::validation::validate_earth_radius;
///
/// assert!(validate_earth_radius(6_371_000.0).is_ok());
/// assert!(validate_earth_radius(0.0).is_err());
/// assert!(validate_earth_radius(f64::NAN).is_err());
/// ```
pub fn validate_earth_radius(radius: f64) -> Result<()> {
    if !radius.is_finite() {
        return Err(ParcelError::InvalidInput(format!(
            "Radius must be finite, got: {}",
            radius
        )));
    }
    if radius <= 0.0 {
        return Err(ParcelError::InvalidInput(format!(
            "Radius must be positive, got: {}",
            radius
        )));
    }
    Ok(())
}
