//! Boundary measurement on a spherical earth.
//!
//! Distances use the haversine formula and areas use the spherical excess
//! accumulated per edge, both with a mean earth radius of 6 371 000 m. This is
//! accurate enough for farm-scale parcels; it is not survey grade. The
//! [`DistanceMetric::Geodesic`] option defers to the ellipsoidal solver in the
//! `geo` crate when a closer figure is needed.
//!
//! Rings may be passed open or pre-closed (first point repeated at the end).
//! Every function here accepts both forms.

use crate::types::GeoPoint;
use geo::{Distance, Geodesic, Rhumb};
use serde::{Deserialize, Serialize};

/// Mean earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Square meters in one international acre.
pub const SQ_METERS_PER_ACRE: f64 = 4046.86;

/// Feet in one meter.
pub const FEET_PER_METER: f64 = 3.28084;

/// Decimal places kept for areas reported in acres.
pub const ACRE_DECIMALS: u32 = 2;

/// Distance metrics for segment lengths.
///
/// - **Haversine**: spherical great-circle distance, the default for all measurements
/// - **Geodesic**: ellipsoidal distance (Karney 2013), slower and more accurate
/// - **Rhumb**: constant-bearing distance, useful for fence lines drawn on a compass heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Haversine,
    Geodesic,
    Rhumb,
}

/// Great-circle distance in meters on a sphere of the given radius.
///
/// Symmetric in its arguments and exactly zero for coincident points. The
/// haversine term is clamped so antipodal points yield half the circumference
/// rather than NaN.
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint, radius: f64) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let d_lat = (lat2 - lat1).abs();
    let d_lng = (b.lng().to_radians() - a.lng().to_radians()).abs();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * radius * h.sqrt().asin()
}

/// Great-circle distance in meters between two points.
///
/// # Examples
///
/// ```
/// use parcel::GeoPoint;
/// use parcel::spatial::distance;
///
/// let gate = GeoPoint::new(44.0, -72.0);
/// let well = GeoPoint::new(44.001, -72.0);
/// let d = distance(&gate, &well);
/// assert!((d - 111.19).abs() < 0.01);
/// assert_eq!(d, distance(&well, &gate));
/// ```
#[inline]
pub fn distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    haversine_distance(a, b, EARTH_RADIUS_M)
}

/// Distance in meters between two points using the given metric.
pub fn distance_between(a: &GeoPoint, b: &GeoPoint, metric: DistanceMetric) -> f64 {
    match metric {
        DistanceMetric::Haversine => distance(a, b),
        DistanceMetric::Geodesic => {
            Geodesic.distance(geo::Point::from(*a), geo::Point::from(*b))
        }
        DistanceMetric::Rhumb => Rhumb.distance(geo::Point::from(*a), geo::Point::from(*b)),
    }
}

/// Whether the ring repeats its first point at the end.
#[inline]
pub fn is_closed(ring: &[GeoPoint]) -> bool {
    ring.len() > 1 && ring.first() == ring.last()
}

/// The ring without its closing point, if it has one.
pub fn open_ring(ring: &[GeoPoint]) -> &[GeoPoint] {
    if is_closed(ring) {
        &ring[..ring.len() - 1]
    } else {
        ring
    }
}

/// The ring with the first point appended when it is not already closed.
pub fn closed_ring(ring: &[GeoPoint]) -> Vec<GeoPoint> {
    let mut closed = ring.to_vec();
    if let Some(first) = ring.first()
        && !is_closed(ring)
    {
        closed.push(*first);
    }
    closed
}

/// Round `value` to `decimals` decimal places (half away from zero).
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[inline]
pub fn meters_to_feet(meters: f64) -> f64 {
    meters * FEET_PER_METER
}

#[inline]
pub fn square_meters_to_acres(square_meters: f64) -> f64 {
    square_meters / SQ_METERS_PER_ACRE
}

/// Unsigned spherical area in square meters for a sphere of the given radius.
///
/// Accumulates `(lng2 - lng1) * (2 + sin(lat1) + sin(lat2))` over each edge of
/// the closed ring, in radians, then scales by `radius² / 2`. Fewer than three
/// input points give zero.
pub fn spherical_ring_area(ring: &[GeoPoint], radius: f64) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }

    let closed = closed_ring(ring);
    let sum: f64 = closed
        .windows(2)
        .map(|edge| {
            let (p1, p2) = (edge[0], edge[1]);
            (p2.lng().to_radians() - p1.lng().to_radians())
                * (2.0 + p1.lat().to_radians().sin() + p2.lat().to_radians().sin())
        })
        .sum();

    (sum * radius * radius / 2.0).abs()
}

/// Unsigned ring area in square meters, not rounded.
#[inline]
pub fn ring_area_square_meters(ring: &[GeoPoint]) -> f64 {
    spherical_ring_area(ring, EARTH_RADIUS_M)
}

/// Ring area in acres, rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use parcel::GeoPoint;
/// use parcel::spatial::ring_area_acres;
///
/// let pasture = [
///     GeoPoint::new(0.0, 0.0),
///     GeoPoint::new(0.0, 0.001),
///     GeoPoint::new(0.001, 0.001),
///     GeoPoint::new(0.001, 0.0),
/// ];
/// assert_eq!(ring_area_acres(&pasture), 3.06);
/// assert_eq!(ring_area_acres(&pasture[..2]), 0.0);
/// ```
pub fn ring_area_acres(ring: &[GeoPoint]) -> f64 {
    round_to(
        square_meters_to_acres(ring_area_square_meters(ring)),
        ACRE_DECIMALS,
    )
}

/// Sum of segment lengths along the points, using `measure` for each segment.
pub(crate) fn chain_length<F>(points: &[GeoPoint], measure: F) -> f64
where
    F: Fn(&GeoPoint, &GeoPoint) -> f64,
{
    points
        .windows(2)
        .map(|segment| measure(&segment[0], &segment[1]))
        .sum()
}

/// Chain length plus the wrap-around edge from the last point back to the first.
pub(crate) fn loop_length<F>(ring: &[GeoPoint], measure: F) -> f64
where
    F: Fn(&GeoPoint, &GeoPoint) -> f64,
{
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() >= 2 => {
            chain_length(ring, &measure) + measure(last, first)
        }
        _ => 0.0,
    }
}

/// Ring perimeter in meters, including the closing edge. Not rounded.
pub fn ring_perimeter_meters(ring: &[GeoPoint]) -> f64 {
    loop_length(ring, distance)
}

/// Ring perimeter in feet, rounded to the nearest foot.
///
/// # Examples
///
/// ```
/// use parcel::GeoPoint;
/// use parcel::spatial::ring_perimeter_feet;
///
/// let a = GeoPoint::new(44.0, -72.0);
/// let b = GeoPoint::new(44.001, -72.0);
/// // Out and back along the same line.
/// assert_eq!(ring_perimeter_feet(&[a, b]), 730);
/// assert_eq!(ring_perimeter_feet(&[a]), 0);
/// ```
pub fn ring_perimeter_feet(ring: &[GeoPoint]) -> u64 {
    meters_to_feet(ring_perimeter_meters(ring)).round() as u64
}

/// Open path length in meters, with no closing edge.
pub fn path_length_meters(path: &[GeoPoint]) -> f64 {
    chain_length(path, distance)
}

/// Open path length in feet, not rounded.
pub fn path_length_feet(path: &[GeoPoint]) -> f64 {
    meters_to_feet(path_length_meters(path))
}

/// Open path length in feet, rounded to the nearest foot like
/// [`ring_perimeter_feet`].
pub fn path_length_feet_rounded(path: &[GeoPoint]) -> u64 {
    path_length_feet(path).round() as u64
}

/// Flat arithmetic mean of the ring's vertices.
///
/// Only suitable for placing a label or marker. It is neither area weighted
/// nor geodesically correct. A closing point is ignored so it is not counted
/// twice. An empty ring yields the origin.
pub fn centroid(ring: &[GeoPoint]) -> GeoPoint {
    let vertices = open_ring(ring);
    if vertices.is_empty() {
        return GeoPoint::origin();
    }

    let n = vertices.len() as f64;
    let (lat_sum, lng_sum) = vertices
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat(), lng + p.lng()));

    GeoPoint::new(lat_sum / n, lng_sum / n)
}
