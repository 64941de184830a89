//! Radar station descriptions.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::raster::ImageGeometry;

/// A fixed weather-radar installation.
///
/// Stations are configuration data, validated at the load boundary and
/// read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Dataset identifier, unique within the configured set
    pub id: String,
    /// Human-readable station name
    pub name: String,
    /// Antenna location
    pub location: GeoPoint,
    /// Geometry of this station's image product
    pub geometry: ImageGeometry,
}
