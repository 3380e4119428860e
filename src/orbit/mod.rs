mod cache;
mod eci;
mod error;
mod frames;
mod ground_track;
mod propagator;
#[cfg(test)]
pub(crate) mod testing;

pub use cache::OrbitTrackCache;
pub use eci::{OrbitTrace, OrbitTraceComputer, DEFAULT_POINT_COUNT};
pub use error::TrajectoryError;
pub use frames::{
    distance_km, ecef_to_geodetic, gmst, teme_to_ecef_position, teme_to_geodetic, GeoPoint,
};
pub use ground_track::{
    GroundTrack, GroundTrackComputer, GroundTrackOptions, STATIONARY_THRESHOLD_DEG,
};
pub use propagator::{period_from_mean_motion, Clock, Propagator, Sgp4Propagator};
