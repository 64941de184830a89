//! Common types shared across the radar-rain-check workspace.

pub mod calibration;
pub mod error;
pub mod geo;
pub mod raster;
pub mod station;

pub use calibration::{CalibrationEntry, CalibrationTable};
pub use error::{RadarError, RadarResult};
pub use geo::GeoPoint;
pub use raster::{ImageGeometry, PixelCoordinate};
pub use station::Station;
