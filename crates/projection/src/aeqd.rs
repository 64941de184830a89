//! Azimuthal equidistant projection.
//!
//! Single-site radar products are rendered on a plane centered at the
//! antenna, where every pixel's offset from the center is the true
//! ground distance along the azimuth to that point. The forward
//! transform therefore solves the geodesic inverse problem on the WGS84
//! ellipsoid (Vincenty's formulae): distance `s` and forward azimuth
//! `alpha` from the origin give
//!
//!   east  = s * sin(alpha)
//!   north = s * cos(alpha)
//!
//! and the inverse transform solves the geodesic direct problem from
//! the origin along `atan2(east, north)` for `hypot(east, north)`
//! meters.
//!
//! Reference: T. Vincenty, "Direct and inverse solutions of geodesics
//! on the ellipsoid with application of nested equations" (1975).

use radar_common::{GeoPoint, RadarResult};

use std::f64::consts::PI;

/// WGS84 semi-major axis (meters)
const SEMI_MAJOR_M: f64 = 6_378_137.0;
/// WGS84 flattening
const FLATTENING: f64 = 1.0 / 298.257_223_563;
/// WGS84 semi-minor axis (meters)
const SEMI_MINOR_M: f64 = SEMI_MAJOR_M * (1.0 - FLATTENING);

/// Iteration cutoff in radians (~6 micrometers on the ground).
///
/// The iterations only struggle near the antipode of the origin; the
/// radar domain stays within a few hundred kilometers of it.
const CONVERGENCE: f64 = 1e-12;
const MAX_ITERATIONS: usize = 64;

/// Azimuthal equidistant projection centered at a fixed origin.
///
/// Deterministic and side-effect-free for a given origin, so instances
/// are safe to memoize indefinitely (see [`crate::FrameCache`]).
#[derive(Debug, Clone)]
pub struct AeqdProjection {
    origin: GeoPoint,
    /// Origin latitude/longitude in radians
    lat0: f64,
    lon0: f64,
    /// Sine/cosine of the origin's reduced latitude
    sin_u0: f64,
    cos_u0: f64,
    tan_u0: f64,
}

impl AeqdProjection {
    /// Build the projection for an origin, rejecting out-of-range
    /// coordinates before any computation.
    pub fn new(origin: GeoPoint) -> RadarResult<Self> {
        origin.validate()?;

        let lat0 = origin.latitude.to_radians();
        let lon0 = origin.longitude.to_radians();
        let tan_u0 = (1.0 - FLATTENING) * lat0.tan();
        let cos_u0 = 1.0 / (1.0 + tan_u0 * tan_u0).sqrt();
        let sin_u0 = tan_u0 * cos_u0;

        Ok(Self {
            origin,
            lat0,
            lon0,
            sin_u0,
            cos_u0,
            tan_u0,
        })
    }

    /// The projection center.
    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    /// Convert a geographic point to its planar offset from the origin
    /// in meters, (east, north).
    pub fn forward(&self, point: GeoPoint) -> RadarResult<(f64, f64)> {
        point.validate()?;

        let lat = point.latitude.to_radians();
        let lon = point.longitude.to_radians();

        if (lat - self.lat0).abs() < f64::EPSILON && (lon - self.lon0).abs() < f64::EPSILON {
            return Ok((0.0, 0.0));
        }

        let (s, alpha) = self.geodesic_inverse(lat, lon);
        Ok((s * alpha.sin(), s * alpha.cos()))
    }

    /// Convert a planar offset in meters back to the geographic point.
    /// Exact algebraic inverse of [`forward`](Self::forward) up to
    /// iteration tolerance.
    pub fn inverse(&self, east_m: f64, north_m: f64) -> GeoPoint {
        let distance = (east_m * east_m + north_m * north_m).sqrt();
        if distance == 0.0 {
            return self.origin;
        }
        let azimuth = east_m.atan2(north_m);
        self.geodesic_direct(distance, azimuth)
    }

    /// Planar distance from the origin to a point, in kilometers.
    pub fn distance_km(&self, point: GeoPoint) -> RadarResult<f64> {
        let (east, north) = self.forward(point)?;
        Ok((east * east + north * north).sqrt() / 1000.0)
    }

    /// Geodesic inverse problem: distance (meters) and forward azimuth
    /// (radians, clockwise from north) from the origin to (lat, lon).
    fn geodesic_inverse(&self, lat: f64, lon: f64) -> (f64, f64) {
        let tan_u2 = (1.0 - FLATTENING) * lat.tan();
        let cos_u2 = 1.0 / (1.0 + tan_u2 * tan_u2).sqrt();
        let sin_u2 = tan_u2 * cos_u2;

        // Longitude difference normalized to [-pi, pi]
        let mut l = lon - self.lon0;
        while l > PI {
            l -= 2.0 * PI;
        }
        while l < -PI {
            l += 2.0 * PI;
        }

        let mut lambda = l;
        let mut iterations = 0;
        let sin_sigma;
        let cos_sigma;
        let sigma;
        let cos2_alpha;
        let cos_2sigma_m;

        loop {
            let sin_lambda = lambda.sin();
            let cos_lambda = lambda.cos();

            let term_a = cos_u2 * sin_lambda;
            let term_b = self.cos_u0 * sin_u2 - self.sin_u0 * cos_u2 * cos_lambda;
            let sin_sig = (term_a * term_a + term_b * term_b).sqrt();
            if sin_sig == 0.0 {
                // Coincident points
                return (0.0, 0.0);
            }
            let cos_sig = self.sin_u0 * sin_u2 + self.cos_u0 * cos_u2 * cos_lambda;
            let sig = sin_sig.atan2(cos_sig);

            let sin_alpha = self.cos_u0 * cos_u2 * sin_lambda / sin_sig;
            let cos2_a = 1.0 - sin_alpha * sin_alpha;
            let cos_2sig_m = if cos2_a != 0.0 {
                cos_sig - 2.0 * self.sin_u0 * sin_u2 / cos2_a
            } else {
                // Equatorial geodesic
                0.0
            };

            let c = FLATTENING / 16.0 * cos2_a * (4.0 + FLATTENING * (4.0 - 3.0 * cos2_a));
            let lambda_next = l
                + (1.0 - c)
                    * FLATTENING
                    * sin_alpha
                    * (sig
                        + c * sin_sig
                            * (cos_2sig_m
                                + c * cos_sig * (-1.0 + 2.0 * cos_2sig_m * cos_2sig_m)));

            let delta = (lambda_next - lambda).abs();
            lambda = lambda_next;
            iterations += 1;
            if delta < CONVERGENCE || iterations >= MAX_ITERATIONS {
                sin_sigma = sin_sig;
                cos_sigma = cos_sig;
                sigma = sig;
                cos2_alpha = cos2_a;
                cos_2sigma_m = cos_2sig_m;
                break;
            }
        }

        let sin_lambda = lambda.sin();
        let cos_lambda = lambda.cos();

        let u_sq = cos2_alpha * (SEMI_MAJOR_M * SEMI_MAJOR_M - SEMI_MINOR_M * SEMI_MINOR_M)
            / (SEMI_MINOR_M * SEMI_MINOR_M);
        let big_a =
            1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
        let delta_sigma = big_b
            * sin_sigma
            * (cos_2sigma_m
                + big_b / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                        - big_b / 6.0
                            * cos_2sigma_m
                            * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                            * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));

        let distance = SEMI_MINOR_M * big_a * (sigma - delta_sigma);
        let azimuth = (cos_u2 * sin_lambda)
            .atan2(self.cos_u0 * sin_u2 - self.sin_u0 * cos_u2 * cos_lambda);

        (distance, azimuth)
    }

    /// Geodesic direct problem: the point reached from the origin after
    /// `distance` meters along `azimuth` (radians, clockwise from north).
    fn geodesic_direct(&self, distance: f64, azimuth: f64) -> GeoPoint {
        let sin_alpha1 = azimuth.sin();
        let cos_alpha1 = azimuth.cos();

        let sigma1 = self.tan_u0.atan2(cos_alpha1);
        let sin_alpha = self.cos_u0 * sin_alpha1;
        let cos2_alpha = 1.0 - sin_alpha * sin_alpha;

        let u_sq = cos2_alpha * (SEMI_MAJOR_M * SEMI_MAJOR_M - SEMI_MINOR_M * SEMI_MINOR_M)
            / (SEMI_MINOR_M * SEMI_MINOR_M);
        let big_a =
            1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

        let base_sigma = distance / (SEMI_MINOR_M * big_a);
        let mut sigma = base_sigma;
        let mut iterations = 0;
        let sin_sigma;
        let cos_sigma;
        let cos_2sigma_m;

        loop {
            let cos_2sig_m = (2.0 * sigma1 + sigma).cos();
            let sin_sig = sigma.sin();
            let cos_sig = sigma.cos();

            let delta_sigma = big_b
                * sin_sig
                * (cos_2sig_m
                    + big_b / 4.0
                        * (cos_sig * (-1.0 + 2.0 * cos_2sig_m * cos_2sig_m)
                            - big_b / 6.0
                                * cos_2sig_m
                                * (-3.0 + 4.0 * sin_sig * sin_sig)
                                * (-3.0 + 4.0 * cos_2sig_m * cos_2sig_m)));

            let sigma_next = base_sigma + delta_sigma;
            let delta = (sigma_next - sigma).abs();
            sigma = sigma_next;
            iterations += 1;
            if delta < CONVERGENCE || iterations >= MAX_ITERATIONS {
                sin_sigma = sigma.sin();
                cos_sigma = sigma.cos();
                cos_2sigma_m = (2.0 * sigma1 + sigma).cos();
                break;
            }
        }

        let term = self.sin_u0 * sin_sigma - self.cos_u0 * cos_sigma * cos_alpha1;
        let lat = (self.sin_u0 * cos_sigma + self.cos_u0 * sin_sigma * cos_alpha1)
            .atan2((1.0 - FLATTENING) * (sin_alpha * sin_alpha + term * term).sqrt());

        let lambda = (sin_sigma * sin_alpha1)
            .atan2(self.cos_u0 * cos_sigma - self.sin_u0 * sin_sigma * cos_alpha1);
        let c = FLATTENING / 16.0 * cos2_alpha * (4.0 + FLATTENING * (4.0 - 3.0 * cos2_alpha));
        let l = lambda
            - (1.0 - c)
                * FLATTENING
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m
                            + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

        let mut lon = self.lon0 + l;
        while lon > PI {
            lon -= 2.0 * PI;
        }
        while lon < -PI {
            lon += 2.0 * PI;
        }

        GeoPoint {
            latitude: lat.to_degrees(),
            longitude: lon.to_degrees(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_common::RadarError;

    fn frame() -> AeqdProjection {
        AeqdProjection::new(GeoPoint::new(25.0, 121.5).unwrap()).unwrap()
    }

    #[test]
    fn test_origin_maps_to_zero() {
        let proj = frame();
        let (east, north) = proj.forward(proj.origin()).unwrap();
        assert_eq!(east, 0.0);
        assert_eq!(north, 0.0);
    }

    #[test]
    fn test_roundtrip_within_radar_range() {
        let proj = frame();

        // Offsets out to ~300 km in varied directions
        let offsets = [
            (0.0, 5_000.0),
            (12_500.0, 0.0),
            (-40_000.0, 85_000.0),
            (150_000.0, -90_000.0),
            (-200_000.0, -210_000.0),
            (212_000.0, 212_000.0),
        ];

        for (east, north) in offsets {
            let point = proj.inverse(east, north);
            let (east2, north2) = proj.forward(point).unwrap();
            assert!(
                (east2 - east).abs() < 0.01,
                "east roundtrip failed: {} vs {}",
                east,
                east2
            );
            assert!(
                (north2 - north).abs() < 0.01,
                "north roundtrip failed: {} vs {}",
                north,
                north2
            );
        }
    }

    #[test]
    fn test_roundtrip_in_degrees() {
        let proj = frame();

        let point = GeoPoint::new(23.8, 120.2).unwrap();
        let (east, north) = proj.forward(point).unwrap();
        let back = proj.inverse(east, north);

        assert!((back.latitude - point.latitude).abs() < 1e-6);
        assert!((back.longitude - point.longitude).abs() < 1e-6);
    }

    #[test]
    fn test_cardinal_directions() {
        let proj = frame();

        // Due north: positive north, negligible east
        let north_point = proj.inverse(0.0, 50_000.0);
        assert!(north_point.latitude > 25.0);
        let (east, north) = proj.forward(north_point).unwrap();
        assert!(east.abs() < 0.01);
        assert!((north - 50_000.0).abs() < 0.01);

        // Due east: positive east
        let east_point = proj.inverse(50_000.0, 0.0);
        assert!(east_point.longitude > 121.5);
        let (east, north) = proj.forward(east_point).unwrap();
        assert!((east - 50_000.0).abs() < 0.01);
        assert!(north.abs() < 0.01);
    }

    #[test]
    fn test_known_geodesic_distances() {
        // One degree of latitude from the equator is 110.574 km
        let equator = AeqdProjection::new(GeoPoint::new(0.0, 0.0).unwrap()).unwrap();
        let d = equator
            .distance_km(GeoPoint::new(1.0, 0.0).unwrap())
            .unwrap();
        assert!((d - 110.574).abs() < 0.01, "1 deg lat: got {} km", d);

        // One degree of longitude along the equator is 111.320 km
        let d = equator
            .distance_km(GeoPoint::new(0.0, 1.0).unwrap())
            .unwrap();
        assert!((d - 111.320).abs() < 0.01, "1 deg lon: got {} km", d);
    }

    #[test]
    fn test_invalid_origin_rejected() {
        let bad = GeoPoint {
            latitude: 95.0,
            longitude: 0.0,
        };
        assert!(matches!(
            AeqdProjection::new(bad),
            Err(RadarError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_invalid_point_rejected() {
        let proj = frame();
        let bad = GeoPoint {
            latitude: 0.0,
            longitude: 200.0,
        };
        assert!(matches!(
            proj.forward(bad),
            Err(RadarError::InvalidCoordinate { .. })
        ));
    }
}
