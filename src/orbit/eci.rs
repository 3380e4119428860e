use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use serde::Serialize;

use super::cache::OrbitTrackCache;
use super::error::TrajectoryError;
use super::propagator::{Clock, Propagator};
use crate::catalog::{ElementSet, SatelliteRecord};

pub const DEFAULT_POINT_COUNT: usize = 300;

/// One revolution in the inertial frame, sampled at a uniform step. The first and last
/// points are one period apart, so the loop closes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrbitTrace {
    pub start: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub step: Duration,
    /// TEME kilometres.
    pub points: Vec<[f64; 3]>,
}

impl OrbitTrace {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

pub struct OrbitTraceComputer<'a, P: Propagator> {
    propagator: &'a P,
    cache: &'a OrbitTrackCache,
    clock: Clock,
}

impl<'a, P: Propagator> OrbitTraceComputer<'a, P> {
    pub fn new(propagator: &'a P, cache: &'a OrbitTrackCache) -> Self {
        Self {
            propagator,
            cache,
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// `point_count` samples spanning one period from now. Empty when the record has no
    /// element set or any single sample fails to propagate.
    pub fn compute_orbit_trace(
        &self,
        record: &SatelliteRecord,
        point_count: usize,
    ) -> Arc<OrbitTrace> {
        let Some(set) = record.element_set.as_ref() else {
            debug!("{}", TrajectoryError::MissingElementSet(record.id.clone()));
            return Arc::new(OrbitTrace::default());
        };

        self.cache.orbit_trace(&record.id, point_count, || {
            self.build(set, point_count).unwrap_or_else(|e| {
                warn!("Orbit trace for {} unavailable: {}", record.id, e);
                OrbitTrace::default()
            })
        })
    }

    fn build(&self, set: &ElementSet, point_count: usize) -> Result<OrbitTrace, TrajectoryError> {
        let intervals = point_count
            .checked_sub(1)
            .filter(|n| *n > 0)
            .and_then(|n| i32::try_from(n).ok())
            .ok_or(TrajectoryError::InvalidPointCount(point_count))?;

        let start = self.clock.now();
        let period = self.propagator.period(set)?;

        let points = (0..=intervals)
            .map(|i| start + period * i / intervals)
            .map(|t| self.propagator.propagate(set, t))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(OrbitTrace {
            start: Some(start),
            step: period / intervals,
            points,
        })
    }
}
