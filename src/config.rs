//! Measurement configuration.
//!
//! A [`Config`] is built explicitly and handed to [`crate::Measurer::new`].
//! There is no process-wide configuration; callers that load settings from
//! JSON or TOML do so here and pass the result along.

use crate::error::{ParcelError, Result};
use crate::spatial::{ACRE_DECIMALS, DistanceMetric, EARTH_RADIUS_M};
use crate::validation::validate_earth_radius;
use serde::de::Error;
use serde::{Deserialize, Serialize};

/// Settings that control how boundaries are measured.
///
/// # Example
///
/// ```rust
/// use parcel::{Config, DistanceMetric};
///
/// let config = Config::default();
/// assert_eq!(config.earth_radius_m, 6_371_000.0);
///
/// let json = r#"{ "metric": "geodesic", "area_decimals": 3 }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.metric, DistanceMetric::Geodesic);
/// assert_eq!(config.area_decimals, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Sphere radius used for haversine distances and area.
    #[serde(default = "Config::default_earth_radius")]
    pub earth_radius_m: f64,

    /// Metric for perimeter and path segments.
    #[serde(default)]
    pub metric: DistanceMetric,

    /// Decimal places kept when reporting acres.
    #[serde(default = "Config::default_area_decimals")]
    pub area_decimals: u32,

    /// Reject out-of-range coordinates when summarizing a boundary.
    #[serde(default = "Config::default_validate_coordinates")]
    pub validate_coordinates: bool,
}

impl Config {
    const MAX_AREA_DECIMALS: u32 = 10;

    const fn default_earth_radius() -> f64 {
        EARTH_RADIUS_M
    }

    const fn default_area_decimals() -> u32 {
        ACRE_DECIMALS
    }

    const fn default_validate_coordinates() -> bool {
        true
    }

    pub fn with_earth_radius(mut self, radius_m: f64) -> Self {
        self.earth_radius_m = radius_m;
        self
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_area_decimals(mut self, decimals: u32) -> Self {
        assert!(
            decimals <= Self::MAX_AREA_DECIMALS,
            "Area precision must be at most {} decimals",
            Self::MAX_AREA_DECIMALS
        );
        self.area_decimals = decimals;
        self
    }

    pub fn with_coordinate_validation(mut self, enabled: bool) -> Self {
        self.validate_coordinates = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_earth_radius(self.earth_radius_m).map_err(|e| ParcelError::Config(e.to_string()))?;

        if self.area_decimals > Self::MAX_AREA_DECIMALS {
            return Err(ParcelError::Config(format!(
                "Area precision must be at most {} decimals, got {}",
                Self::MAX_AREA_DECIMALS,
                self.area_decimals
            )));
        }

        if self.metric != DistanceMetric::Haversine && self.earth_radius_m != EARTH_RADIUS_M {
            log::warn!(
                "earth_radius_m = {} only affects area when metric is {:?}",
                self.earth_radius_m,
                self.metric
            );
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            earth_radius_m: Self::default_earth_radius(),
            metric: DistanceMetric::default(),
            area_decimals: Self::default_area_decimals(),
            validate_coordinates: Self::default_validate_coordinates(),
        }
    }
}
