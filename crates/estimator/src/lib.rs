//! Point rainfall estimation from radar reflectivity imagery.
//!
//! The estimation chain:
//! - nearest-station selection (planar distance in a station-centered
//!   azimuthal equidistant frame)
//! - geographic point to image pixel mapping
//! - pixel color to reflectivity (dBZ) via the calibration table
//! - reflectivity to rain-intensity category

pub mod estimate;
pub mod intensity;
pub mod pixel;
pub mod reflectivity;
pub mod selector;

pub use estimate::{Estimate, PixelSource, RainEstimator};
pub use intensity::{classify, IntensityCategory, RainRange};
pub use pixel::to_pixel;
pub use reflectivity::resolve_dbz;
pub use selector::select_nearest;
