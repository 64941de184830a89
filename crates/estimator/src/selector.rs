//! Nearest radar station selection.

use projection::FrameCache;
use radar_common::{GeoPoint, RadarError, RadarResult, Station};
use tracing::debug;

/// Pick the station closest to `point`, returning it with the distance
/// in kilometers.
///
/// Distance is the planar offset magnitude in the station-centered
/// azimuthal equidistant frame, which is the geodesic distance by
/// construction. Ties resolve to the first station in input order.
pub fn select_nearest<'a>(
    frames: &mut FrameCache,
    point: GeoPoint,
    stations: &'a [Station],
) -> RadarResult<(&'a Station, f64)> {
    if stations.is_empty() {
        return Err(RadarError::EmptyStationSet);
    }

    let mut best: Option<(&Station, f64)> = None;
    for station in stations {
        let frame = frames.frame(station.location)?;
        let distance_km = frame.distance_km(point)?;
        debug!(station = %station.id, distance_km, "station distance");

        // Strict comparison keeps the earliest station on ties
        match best {
            Some((_, best_km)) if distance_km >= best_km => {}
            _ => best = Some((station, distance_km)),
        }
    }

    // stations is non-empty, so best is set
    Ok(best.expect("non-empty station set"))
}
