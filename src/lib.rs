//! Boundary measurement for farm land planning: acres, perimeter, path length,
//! GeoJSON conversion, and KML/GeoJSON boundary import.
//!
//! ```rust
//! use parcel::{GeoPoint, geojson, import, spatial};
//!
//! let kml = "<coordinates>-72.0,44.0,0 -72.0,44.001,0 -71.999,44.001,0 -71.999,44.0,0</coordinates>";
//! let polygon = import::parse_kml(kml).expect("boundary");
//!
//! let ring = geojson::geojson_to_ring(&polygon)?;
//! assert_eq!(ring[0], GeoPoint::new(44.0, -72.0));
//!
//! let acres = spatial::ring_area_acres(&ring);
//! let perimeter_ft = spatial::ring_perimeter_feet(&ring);
//! assert!(acres > 2.0 && perimeter_ft > 1000);
//! # Ok::<(), parcel::ParcelError>(())
//! ```

pub mod config;
pub mod error;
pub mod geojson;
pub mod import;
pub mod measure;
pub mod spatial;
pub mod types;
pub mod validation;

pub use config::Config;
pub use error::{ParcelError, Result};
pub use measure::Measurer;
pub use types::{Boundary, BoundarySummary, GeoPoint};

pub use spatial::{
    DistanceMetric, centroid, distance, distance_between, path_length_feet,
    path_length_feet_rounded, ring_area_acres, ring_perimeter_feet,
};

pub use crate::geojson::{geojson_to_ring, ring_to_geojson};
pub use import::{BoundarySource, FileSource, TextSource, import_boundary, parse_geojson, parse_kml};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Boundary, BoundarySummary, Config, GeoPoint, Measurer, ParcelError, Result};

    pub use crate::spatial::{
        DistanceMetric, centroid, distance, path_length_feet, ring_area_acres,
        ring_perimeter_feet,
    };

    pub use crate::geojson::{geojson_to_ring, ring_to_geojson};

    pub use crate::import::{BoundarySource, import_boundary, parse_geojson, parse_kml};
}
