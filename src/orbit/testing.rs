//! Analytic propagators with known geometry, for tests.

use std::f64::consts::TAU;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Duration, Utc};

use super::frames::gmst;
use super::{Propagator, TrajectoryError};
use crate::catalog::ElementSet;

pub const ISS: (&str, &str) = (
    "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992",
    "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008",
);

pub fn dummy_set() -> ElementSet {
    ElementSet::new("1 dummy", "2 dummy")
}

/// Keplerian circular orbit with the ascending node on the inertial x axis.
pub struct CircularPropagator {
    pub period: Duration,
    pub radius_km: f64,
    pub inclination_deg: f64,
    pub epoch: DateTime<Utc>,
}

impl CircularPropagator {
    pub fn leo(epoch: DateTime<Utc>) -> Self {
        Self {
            period: Duration::minutes(95),
            radius_km: 6_900.0,
            inclination_deg: 51.6,
            epoch,
        }
    }
}

impl Propagator for CircularPropagator {
    fn period(&self, _: &ElementSet) -> Result<Duration, TrajectoryError> {
        Ok(self.period)
    }

    fn propagate(&self, _: &ElementSet, t: DateTime<Utc>) -> Result<[f64; 3], TrajectoryError> {
        let elapsed = (t - self.epoch).num_milliseconds() as f64;
        let u = TAU * elapsed / self.period.num_milliseconds() as f64;
        let inc = self.inclination_deg.to_radians();
        Ok([
            self.radius_km * u.cos(),
            self.radius_km * u.sin() * inc.cos(),
            self.radius_km * u.sin() * inc.sin(),
        ])
    }
}

/// Sits above a fixed longitude on the equator, like an ideal geostationary satellite.
pub struct StationaryPropagator {
    pub longitude_deg: f64,
}

impl Propagator for StationaryPropagator {
    fn period(&self, _: &ElementSet) -> Result<Duration, TrajectoryError> {
        Ok(Duration::seconds(86_164))
    }

    fn propagate(&self, _: &ElementSet, t: DateTime<Utc>) -> Result<[f64; 3], TrajectoryError> {
        let angle = gmst(t) + self.longitude_deg.to_radians();
        let r = 42_164.0;
        Ok([r * angle.cos(), r * angle.sin(), 0.0])
    }
}

/// Counts propagation calls of the wrapped propagator.
pub struct Counting<P> {
    pub inner: P,
    pub calls: AtomicUsize,
}

impl<P> Counting<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<P: Propagator> Propagator for Counting<P> {
    fn period(&self, set: &ElementSet) -> Result<Duration, TrajectoryError> {
        self.inner.period(set)
    }

    fn propagate(&self, set: &ElementSet, t: DateTime<Utc>) -> Result<[f64; 3], TrajectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.propagate(set, t)
    }
}

/// Fails every propagation at or after `fail_from`.
pub struct FailingFrom<P> {
    pub inner: P,
    pub fail_from: DateTime<Utc>,
}

impl<P: Propagator> Propagator for FailingFrom<P> {
    fn period(&self, set: &ElementSet) -> Result<Duration, TrajectoryError> {
        self.inner.period(set)
    }

    fn propagate(&self, set: &ElementSet, t: DateTime<Utc>) -> Result<[f64; 3], TrajectoryError> {
        if t >= self.fail_from {
            return Err(TrajectoryError::Propagation("decayed".into()));
        }
        self.inner.propagate(set, t)
    }
}
