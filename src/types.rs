//! Point and boundary record types.
//!
//! `GeoPoint` is the internal coordinate type. It is constructed in
//! `(lat, lng)` order, the opposite of GeoJSON's `[lng, lat]` positions and of
//! `geo::Point::new(x, y)`. Conversions to both are provided so callers never
//! have to swap ordinates by hand.

use geojson::Geometry;
use serde::{Deserialize, Serialize};

/// A geographic point in decimal degrees (WGS84 assumed, no altitude).
///
/// # Examples
///
/// ```
/// use parcel::GeoPoint;
///
/// let barn = GeoPoint::new(44.0012, -72.0008);
/// assert_eq!(barn.lat(), 44.0012);
/// assert_eq!(barn.lng(), -72.0008);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    /// Create a point from latitude and longitude.
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Create a point from a GeoJSON-ordered `(lng, lat)` pair.
    #[inline]
    pub const fn from_lng_lat(lng: f64, lat: f64) -> Self {
        Self { lat, lng }
    }

    /// The origin `(0, 0)`.
    #[inline]
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[inline]
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Both ordinates are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// The GeoJSON position `[lng, lat]`.
    #[inline]
    pub fn to_position(&self) -> Vec<f64> {
        vec![self.lng, self.lat]
    }
}

impl From<geo::Point<f64>> for GeoPoint {
    fn from(point: geo::Point<f64>) -> Self {
        Self::from_lng_lat(point.x(), point.y())
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::Point::new(point.lng, point.lat)
    }
}

impl From<GeoPoint> for geo::Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::Coord {
            x: point.lng,
            y: point.lat,
        }
    }
}

/// `(lat, lng)` tuple, matching the constructor's argument order.
impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Precomputed measurements stored alongside a boundary polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundarySummary {
    /// Enclosed area in acres, rounded to the configured precision.
    pub acres: f64,
    /// Perimeter in whole feet.
    pub perimeter_ft: u64,
    /// Label position (flat average of the vertices).
    pub centroid: GeoPoint,
    /// Number of distinct vertices, excluding any closing point.
    pub vertices: usize,
}

/// A measured boundary ready to be persisted with a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub polygon: Geometry,
    pub summary: BoundarySummary,
}

impl Boundary {
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
