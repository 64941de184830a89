//! End-to-end estimation over a configured station set.

use chrono::{DateTime, Utc};
use image::RgbImage;
use projection::FrameCache;
use radar_common::{
    CalibrationTable, GeoPoint, PixelCoordinate, RadarError, RadarResult, Station,
};
use serde::Serialize;
use tracing::debug;

use crate::intensity::{classify, IntensityCategory, RainRange};
use crate::pixel::to_pixel;
use crate::reflectivity::resolve_dbz;
use crate::selector::select_nearest;

/// Seam to the externally-owned image store: enough surface to sample
/// one pixel of an already-decoded RGB raster.
pub trait PixelSource {
    fn dimensions(&self) -> (u32, u32);
    fn sample(&self, x: u32, y: u32) -> [u8; 3];
}

impl PixelSource for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn sample(&self, x: u32, y: u32) -> [u8; 3] {
        self.get_pixel(x, y).0
    }
}

/// Result of one point query.
#[derive(Debug, Clone, Serialize)]
pub struct Estimate {
    pub timestamp_utc: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub station_id: String,
    pub station_name: String,
    pub distance_km: f64,
    pub pixel: PixelCoordinate,
    /// Color actually sampled from the image
    pub sampled_rgb: [u8; 3],
    /// Calibration color it matched
    pub matched_rgb: [u8; 3],
    pub dbz: i32,
    pub category: IntensityCategory,
    pub rain_mm_per_hr: RainRange,
}

/// Runs the estimation chain against a read-only station set and
/// calibration table, owning the projection frame cache.
pub struct RainEstimator<'a> {
    stations: &'a [Station],
    calibration: &'a CalibrationTable,
    frames: FrameCache,
}

impl<'a> RainEstimator<'a> {
    pub fn new(stations: &'a [Station], calibration: &'a CalibrationTable) -> Self {
        Self {
            stations,
            calibration,
            frames: FrameCache::new(),
        }
    }

    /// Nearest configured station to a query point, with distance in km.
    pub fn nearest_station(&mut self, point: GeoPoint) -> RadarResult<(&'a Station, f64)> {
        select_nearest(&mut self.frames, point, self.stations)
    }

    /// Full chain: select station, map the point into its image, sample,
    /// resolve dBZ, classify.
    ///
    /// `image` must be the product of the nearest station (see
    /// [`nearest_station`](Self::nearest_station)).
    pub fn estimate<S: PixelSource>(
        &mut self,
        point: GeoPoint,
        image: &S,
    ) -> RadarResult<Estimate> {
        let (station, distance_km) = select_nearest(&mut self.frames, point, self.stations)?;
        let pixel = to_pixel(&mut self.frames, point, station.location, &station.geometry)?;

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(RadarError::InvalidImageDimensions { width, height });
        }
        // The decoded file can be smaller than the configured geometry;
        // clamp again before sampling.
        let sampled = image.sample(pixel.x.min(width - 1), pixel.y.min(height - 1));

        let entry = resolve_dbz(sampled, self.calibration.entries())?;
        let (category, rain_mm_per_hr) = classify(entry.dbz);
        debug!(
            station = %station.id,
            distance_km,
            dbz = entry.dbz,
            category = %category,
            "point estimate"
        );

        Ok(Estimate {
            timestamp_utc: Utc::now(),
            latitude: point.latitude,
            longitude: point.longitude,
            station_id: station.id.clone(),
            station_name: station.name.clone(),
            distance_km,
            pixel,
            sampled_rgb: sampled,
            matched_rgb: entry.rgb,
            dbz: entry.dbz,
            category,
            rain_mm_per_hr,
        })
    }
}
