//! Memoized projection frames.

use std::collections::HashMap;
use std::sync::Arc;

use radar_common::{GeoPoint, RadarResult};

use crate::aeqd::AeqdProjection;

/// Origins are bucketed to 1e-6 degrees (about 0.1 m) for cache keys.
const KEY_SCALE: f64 = 1e6;

/// Explicit cache of projection frames keyed by rounded origin.
///
/// Frame construction is a pure function of the origin, so entries are
/// retained for the cache's lifetime. The working set is the handful of
/// configured stations plus query points, so the map is unbounded.
#[derive(Debug, Default)]
pub struct FrameCache {
    frames: HashMap<(i64, i64), Arc<AeqdProjection>>,
}

impl FrameCache {
    pub fn new() -> Self {
        Self {
            frames: HashMap::new(),
        }
    }

    /// Get or build the frame centered at `origin`.
    pub fn frame(&mut self, origin: GeoPoint) -> RadarResult<Arc<AeqdProjection>> {
        let key = cache_key(origin);
        if let Some(frame) = self.frames.get(&key) {
            return Ok(Arc::clone(frame));
        }

        let frame = Arc::new(AeqdProjection::new(origin)?);
        self.frames.insert(key, Arc::clone(&frame));
        Ok(frame)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

fn cache_key(origin: GeoPoint) -> (i64, i64) {
    (
        (origin.latitude * KEY_SCALE).round() as i64,
        (origin.longitude * KEY_SCALE).round() as i64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_origin_shares_frame() {
        let mut cache = FrameCache::new();
        let origin = GeoPoint::new(25.0, 121.5).unwrap();

        let a = cache.frame(origin).unwrap();
        let b = cache.frame(origin).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_origins_within_key_tolerance_share_frame() {
        let mut cache = FrameCache::new();

        let a = cache.frame(GeoPoint::new(25.0, 121.5).unwrap()).unwrap();
        let b = cache
            .frame(GeoPoint::new(25.000_000_4, 121.5).unwrap())
            .unwrap();

        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_distinct_origins_get_distinct_frames() {
        let mut cache = FrameCache::new();

        let a = cache.frame(GeoPoint::new(25.0, 121.5).unwrap()).unwrap();
        let b = cache.frame(GeoPoint::new(24.131, 120.634).unwrap()).unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_invalid_origin_not_cached() {
        let mut cache = FrameCache::new();
        let bad = GeoPoint {
            latitude: -91.0,
            longitude: 0.0,
        };

        assert!(cache.frame(bad).is_err());
        assert!(cache.is_empty());
    }
}
