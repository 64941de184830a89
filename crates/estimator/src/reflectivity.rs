//! Reverse color-to-reflectivity lookup.

use radar_common::{CalibrationEntry, RadarError, RadarResult};

/// Find the calibration entry whose color is nearest to the sampled
/// pixel, by Euclidean distance in RGB space.
///
/// The table is small and static, so an exact linear scan is used.
/// Ties resolve to the first entry in table order.
pub fn resolve_dbz<'a>(
    rgb: [u8; 3],
    table: &'a [CalibrationEntry],
) -> RadarResult<&'a CalibrationEntry> {
    if table.is_empty() {
        return Err(RadarError::EmptyCalibrationTable);
    }

    let mut best: Option<(&CalibrationEntry, u32)> = None;
    for entry in table {
        let dist = color_distance_sq(rgb, entry.rgb);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((entry, dist)),
        }
    }

    Ok(best.expect("non-empty calibration table").0)
}

/// Squared Euclidean distance, monotonic in the true distance.
fn color_distance_sq(a: [u8; 3], b: [u8; 3]) -> u32 {
    let dr = a[0] as i32 - b[0] as i32;
    let dg = a[1] as i32 - b[1] as i32;
    let db = a[2] as i32 - b[2] as i32;
    (dr * dr + dg * dg + db * db) as u32
}
