mod classify;
mod types;

pub use classify::{classify_orbit, eccentricity, fill_missing_classes};
pub use types::{
    ElementSet, ObjectType, OperationalStatus, OrbitClass, OrbitType, SatelliteRecord,
};
