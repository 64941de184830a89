//! Error types for radar-rain-check crates.

use thiserror::Error;

/// Result type alias using RadarError.
pub type RadarResult<T> = Result<T, RadarError>;

/// Primary error type for rainfall estimation operations.
#[derive(Debug, Error)]
pub enum RadarError {
    #[error("coordinate out of range: lat={latitude}, lon={longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("station set is empty")]
    EmptyStationSet,

    #[error("calibration table is empty")]
    EmptyCalibrationTable,

    #[error("invalid image dimensions: {width}x{height}")]
    InvalidImageDimensions { width: u32, height: u32 },

    #[error("calibration data error: {0}")]
    Calibration(String),
}
