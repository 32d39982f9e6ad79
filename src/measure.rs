//! Configured boundary measurement.

use crate::config::Config;
use crate::error::Result;
use crate::geojson::ring_to_geojson;
use crate::spatial::{
    self, DistanceMetric, chain_length, haversine_distance, loop_length, meters_to_feet,
    open_ring, round_to, spherical_ring_area, square_meters_to_acres,
};
use crate::types::{Boundary, BoundarySummary, GeoPoint};
use crate::validation::{validate_finite_points, validate_ring, validate_ring_vertices};

/// Measures rings and paths with a fixed [`Config`].
///
/// The free functions in [`crate::spatial`] are equivalent to a measurer built
/// from `Config::default()`.
///
/// ```rust
/// use parcel::{GeoPoint, Measurer};
///
/// let measurer = Measurer::default();
/// let garden = [
///     GeoPoint::new(44.0, -72.0),
///     GeoPoint::new(44.0004, -72.0),
///     GeoPoint::new(44.0004, -71.9995),
///     GeoPoint::new(44.0, -71.9995),
/// ];
///
/// let summary = measurer.summarize(&garden)?;
/// assert!(summary.acres > 0.0);
/// assert_eq!(summary.vertices, 4);
/// # Ok::<(), parcel::ParcelError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Measurer {
    config: Config,
}

impl Measurer {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Segment length in meters using the configured metric.
    pub fn distance(&self, a: &GeoPoint, b: &GeoPoint) -> f64 {
        match self.config.metric {
            DistanceMetric::Haversine => haversine_distance(a, b, self.config.earth_radius_m),
            metric => spatial::distance_between(a, b, metric),
        }
    }

    /// Unsigned area in square meters, not rounded.
    pub fn area_square_meters(&self, ring: &[GeoPoint]) -> f64 {
        spherical_ring_area(ring, self.config.earth_radius_m)
    }

    /// Area in acres, rounded to the configured precision.
    pub fn area_acres(&self, ring: &[GeoPoint]) -> f64 {
        round_to(
            square_meters_to_acres(self.area_square_meters(ring)),
            self.config.area_decimals,
        )
    }

    pub fn perimeter_meters(&self, ring: &[GeoPoint]) -> f64 {
        loop_length(ring, |a, b| self.distance(a, b))
    }

    /// Perimeter in feet, rounded to the nearest foot.
    pub fn perimeter_feet(&self, ring: &[GeoPoint]) -> u64 {
        meters_to_feet(self.perimeter_meters(ring)).round() as u64
    }

    pub fn path_length_meters(&self, path: &[GeoPoint]) -> f64 {
        chain_length(path, |a, b| self.distance(a, b))
    }

    /// Path length in feet, not rounded.
    pub fn path_length_feet(&self, path: &[GeoPoint]) -> f64 {
        meters_to_feet(self.path_length_meters(path))
    }

    pub fn path_length_feet_rounded(&self, path: &[GeoPoint]) -> u64 {
        self.path_length_feet(path).round() as u64
    }

    /// Measure a boundary ring for storage.
    ///
    /// Unlike the bare measurement methods this rejects rings with fewer than
    /// three distinct vertices and, when enabled, out-of-range coordinates.
    pub fn summarize(&self, ring: &[GeoPoint]) -> Result<BoundarySummary> {
        if self.config.validate_coordinates {
            validate_ring(ring)?;
        } else {
            validate_finite_points(ring)?;
            validate_ring_vertices(ring)?;
        }

        let summary = BoundarySummary {
            acres: self.area_acres(ring),
            perimeter_ft: self.perimeter_feet(ring),
            centroid: spatial::centroid(ring),
            vertices: open_ring(ring).len(),
        };
        log::debug!(
            "Measured boundary: {} vertices, {} acres, {} ft",
            summary.vertices,
            summary.acres,
            summary.perimeter_ft
        );
        Ok(summary)
    }

    /// Measure a ring and pair the summary with its GeoJSON polygon.
    pub fn boundary(&self, ring: &[GeoPoint]) -> Result<Boundary> {
        let summary = self.summarize(ring)?;
        Ok(Boundary {
            polygon: ring_to_geojson(ring),
            summary,
        })
    }
}
