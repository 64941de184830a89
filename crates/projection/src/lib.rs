//! Azimuthal equidistant projection for radar imagery.
//!
//! Implements the projection from scratch on the WGS84 ellipsoid,
//! without external dependencies.

pub mod aeqd;
pub mod cache;

pub use aeqd::AeqdProjection;
pub use cache::FrameCache;
