//! Orbit geometry, display sampling and catalog filtering for a satellite viewer.
//!
//! Records come in already parsed ([`catalog::SatelliteRecord`]); this crate turns their
//! element sets into ground tracks and inertial orbit traces, bounds how many of them get
//! drawn, and evaluates the catalog filter.

pub mod catalog;
pub mod config;
pub mod filter;
pub mod orbit;
pub mod sampling;

pub use catalog::{ElementSet, OperationalStatus, OrbitClass, SatelliteRecord};
pub use filter::{CriteriaUpdate, FilterCriteria, FilterEngine};
pub use orbit::{
    Clock, GroundTrack, GroundTrackComputer, OrbitTrace, OrbitTraceComputer, OrbitTrackCache,
    Propagator, Sgp4Propagator, TrajectoryError,
};
pub use sampling::{sample_for_display, sample_traceable};
