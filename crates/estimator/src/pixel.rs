//! Geographic point to image pixel mapping.

use projection::FrameCache;
use radar_common::{GeoPoint, ImageGeometry, PixelCoordinate, RadarError, RadarResult};

/// Map a geographic point onto the radar image centered at `origin`.
///
/// The planar offset is scaled by pixels-per-km and applied to the
/// principal point. North decreases the pixel row (`y = cy - north`):
/// image rows grow downward while northing grows upward, and this sign
/// is what puts the point on the correct side of the station.
///
/// The result is rounded to the nearest pixel and clamped into the
/// image. Out-of-frame points are routine and clamp silently.
pub fn to_pixel(
    frames: &mut FrameCache,
    point: GeoPoint,
    origin: GeoPoint,
    geometry: &ImageGeometry,
) -> RadarResult<PixelCoordinate> {
    if geometry.width == 0 || geometry.height == 0 {
        return Err(RadarError::InvalidImageDimensions {
            width: geometry.width,
            height: geometry.height,
        });
    }

    let frame = frames.frame(origin)?;
    let (east_m, north_m) = frame.forward(point)?;

    let (cx, cy) = geometry.principal_point();
    let x = cx + east_m / 1000.0 * geometry.scale_px_per_km;
    let y = cy - north_m / 1000.0 * geometry.scale_px_per_km;

    Ok(PixelCoordinate {
        x: clamp_round(x, geometry.width),
        y: clamp_round(y, geometry.height),
    })
}

fn clamp_round(value: f64, size: u32) -> u32 {
    let rounded = value.round();
    if rounded < 0.0 {
        0
    } else if rounded > (size - 1) as f64 {
        size - 1
    } else {
        rounded as u32
    }
}
