//! Raster image coordinate types.

use serde::{Deserialize, Serialize};

/// A pixel position inside a radar image, clamped into bounds by the
/// pixel mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelCoordinate {
    pub x: u32,
    pub y: u32,
}

/// Geometry of a station's radar image product.
///
/// The image is a square raster centered on the antenna unless a
/// calibrated principal point is configured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageGeometry {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Image scale in pixels per kilometer
    pub scale_px_per_km: f64,
    /// Principal point override; defaults to the image center
    #[serde(default)]
    pub center: Option<(f64, f64)>,
}

impl ImageGeometry {
    pub fn new(width: u32, height: u32, scale_px_per_km: f64) -> Self {
        Self {
            width,
            height,
            scale_px_per_km,
            center: None,
        }
    }

    /// The pixel the projection origin maps to.
    pub fn principal_point(&self) -> (f64, f64) {
        self.center
            .unwrap_or((self.width as f64 / 2.0, self.height as f64 / 2.0))
    }
}
