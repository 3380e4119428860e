use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use serde::Serialize;

use super::cache::OrbitTrackCache;
use super::error::TrajectoryError;
use super::frames::{teme_to_geodetic, GeoPoint};
use super::propagator::{Clock, Propagator};
use crate::catalog::{ElementSet, SatelliteRecord};

/// How many periods to look back for the antimeridian crossing.
const SEARCH_PERIODS: i32 = 2;
const REFINE_RESOLUTION: Duration = Duration::seconds(1);
/// Half-width below which a track counts as stationary on the 2D map.
pub const STATIONARY_THRESHOLD_DEG: f64 = 2.5;

#[derive(Debug, Clone, Copy)]
pub struct GroundTrackOptions {
    pub step: Duration,
    pub fallback_window: Duration,
    pub fallback_step: Duration,
}

impl Default for GroundTrackOptions {
    fn default() -> Self {
        Self {
            step: Duration::seconds(30),
            fallback_window: Duration::hours(6),
            fallback_step: Duration::minutes(1),
        }
    }
}

/// Sub-satellite trace of one revolution, starting just east (or west, for retrograde
/// orbits) of the antimeridian. Near-stationary orbits get a `partial` arc instead.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroundTrack {
    pub start: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub step: Duration,
    pub partial: bool,
    pub points: Vec<GeoPoint>,
}

impl GroundTrack {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Center of the track's bounding box when both its longitude and latitude spans are
    /// under `threshold_deg`, i.e. when it should be drawn as a marker, not a line.
    pub fn stationary_center(&self, threshold_deg: f64) -> Option<GeoPoint> {
        let first = self.points.first()?;
        let (mut lon_min, mut lon_max) = (first.longitude_deg, first.longitude_deg);
        let (mut lat_min, mut lat_max) = (first.latitude_deg, first.latitude_deg);
        for p in &self.points[1..] {
            lon_min = lon_min.min(p.longitude_deg);
            lon_max = lon_max.max(p.longitude_deg);
            lat_min = lat_min.min(p.latitude_deg);
            lat_max = lat_max.max(p.latitude_deg);
        }

        if lon_max - lon_min < threshold_deg && lat_max - lat_min < threshold_deg {
            Some(GeoPoint::new(
                (lon_min + lon_max) / 2.0,
                (lat_min + lat_max) / 2.0,
            ))
        } else {
            None
        }
    }
}

pub struct GroundTrackComputer<'a, P: Propagator> {
    propagator: &'a P,
    cache: &'a OrbitTrackCache,
    options: GroundTrackOptions,
    clock: Clock,
}

impl<'a, P: Propagator> GroundTrackComputer<'a, P> {
    pub fn new(propagator: &'a P, cache: &'a OrbitTrackCache) -> Self {
        Self {
            propagator,
            cache,
            options: GroundTrackOptions::default(),
            clock: Clock::System,
        }
    }

    pub fn with_options(mut self, options: GroundTrackOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Ground track of the satellite's current revolution. Empty when the record has no
    /// element set or propagation fails; the result is cached per record id and step.
    pub fn compute_ground_track(&self, record: &SatelliteRecord) -> Arc<GroundTrack> {
        let Some(set) = record.element_set.as_ref() else {
            debug!("{}", TrajectoryError::MissingElementSet(record.id.clone()));
            return Arc::new(GroundTrack::default());
        };

        self.cache.ground_track(&record.id, self.options.step, || {
            self.build(set).unwrap_or_else(|e| {
                warn!("Ground track for {} unavailable: {}", record.id, e);
                GroundTrack::default()
            })
        })
    }

    fn build(&self, set: &ElementSet) -> Result<GroundTrack, TrajectoryError> {
        let opts = &self.options;
        if opts.step <= Duration::zero() || opts.fallback_step <= Duration::zero() {
            return Err(TrajectoryError::InvalidStep);
        }

        let now = self.clock.now();
        let period = self.propagator.period(set)?;

        match self.last_antimeridian_crossing(set, now, period) {
            Ok(start) => {
                let points = self.sample(set, start, start + period + opts.step, opts.step)?;
                Ok(GroundTrack {
                    start: Some(start),
                    step: opts.step,
                    partial: false,
                    points,
                })
            }
            Err(TrajectoryError::DegenerateOrbitSearch(minutes)) => {
                debug!(
                    "No antimeridian crossing in the last {} min, sampling partial arc",
                    minutes
                );
                let points =
                    self.sample(set, now, now + opts.fallback_window, opts.fallback_step)?;
                Ok(GroundTrack {
                    start: Some(now),
                    step: opts.fallback_step,
                    partial: true,
                    points,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Walks backwards from `now` in coarse steps, then bisects the bracketing interval.
    fn last_antimeridian_crossing(
        &self,
        set: &ElementSet,
        now: DateTime<Utc>,
        period: Duration,
    ) -> Result<DateTime<Utc>, TrajectoryError> {
        let span = period * SEARCH_PERIODS;
        let limit = now - span;
        let step = self.options.step;

        let mut later = now;
        let mut later_lon = self.longitude(set, later)?;
        while later > limit {
            let earlier = later - step;
            let earlier_lon = self.longitude(set, earlier)?;
            if crosses_antimeridian(earlier_lon, later_lon) {
                return self.refine_crossing(set, earlier, earlier_lon, later);
            }
            later = earlier;
            later_lon = earlier_lon;
        }

        Err(TrajectoryError::DegenerateOrbitSearch(span.num_minutes()))
    }

    /// Returns the first instant (to within a second) on the far side of the crossing.
    fn refine_crossing(
        &self,
        set: &ElementSet,
        before: DateTime<Utc>,
        before_lon: f64,
        after: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, TrajectoryError> {
        let mut low = before;
        let mut low_lon = before_lon;
        let mut high = after;

        while high - low > REFINE_RESOLUTION {
            let mid = low + (high - low) / 2;
            let mid_lon = self.longitude(set, mid)?;
            if crosses_antimeridian(low_lon, mid_lon) {
                high = mid;
            } else {
                low = mid;
                low_lon = mid_lon;
            }
        }

        Ok(high)
    }

    fn sample(
        &self,
        set: &ElementSet,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step: Duration,
    ) -> Result<Vec<GeoPoint>, TrajectoryError> {
        let mut cursor = start;
        let mut points = Vec::new();

        while cursor <= end {
            points.push(self.geo_point(set, cursor)?);
            cursor += step;
        }

        Ok(points)
    }

    fn geo_point(&self, set: &ElementSet, t: DateTime<Utc>) -> Result<GeoPoint, TrajectoryError> {
        let pos = self.propagator.propagate(set, t)?;
        Ok(teme_to_geodetic(pos, t))
    }

    fn longitude(&self, set: &ElementSet, t: DateTime<Utc>) -> Result<f64, TrajectoryError> {
        Ok(self.geo_point(set, t)?.longitude_deg)
    }
}

/// True when moving from `a` to `b` wraps across ±180°. Pole passages also flip the
/// longitude sign but stay on one side of ±90°, so they are not counted.
fn crosses_antimeridian(a: f64, b: f64) -> bool {
    a.abs() > 90.0 && b.abs() > 90.0 && a.signum() != b.signum()
}
