use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use sgp4::{Constants, Elements};

use super::error::TrajectoryError;
use crate::catalog::ElementSet;

const MINUTES_PER_DAY: f64 = 1440.0;

/// Position source for an element set.
///
/// Positions are inertial (TEME) kilometres. Implementations must be pure with respect
/// to `(elements, timestamp)`; the trajectory computers rely on that when caching.
pub trait Propagator {
    /// Orbital period derived from the element set's mean motion.
    fn period(&self, elements: &ElementSet) -> Result<Duration, TrajectoryError>;

    fn propagate(
        &self,
        elements: &ElementSet,
        timestamp: DateTime<Utc>,
    ) -> Result<[f64; 3], TrajectoryError>;
}

struct Sgp4Model {
    elements: Elements,
    constants: Constants,
}

/// SGP4/SDP4 propagation backed by the `sgp4` crate.
#[derive(Default)]
pub struct Sgp4Propagator {
    models: Mutex<HashMap<ElementSet, Arc<Sgp4Model>>>,
}

impl Sgp4Propagator {
    pub fn new() -> Self {
        Self::default()
    }

    fn model(&self, set: &ElementSet) -> Result<Arc<Sgp4Model>, TrajectoryError> {
        let mut models = self
            .models
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(model) = models.get(set) {
            return Ok(model.clone());
        }

        let elements = Elements::from_tle(None, set.line1.as_bytes(), set.line2.as_bytes())?;
        let constants = Constants::from_elements(&elements)?;
        let model = Arc::new(Sgp4Model {
            elements,
            constants,
        });
        models.insert(set.clone(), model.clone());
        Ok(model)
    }
}

impl Propagator for Sgp4Propagator {
    fn period(&self, set: &ElementSet) -> Result<Duration, TrajectoryError> {
        let model = self.model(set)?;
        period_from_mean_motion(model.elements.mean_motion)
    }

    fn propagate(
        &self,
        set: &ElementSet,
        timestamp: DateTime<Utc>,
    ) -> Result<[f64; 3], TrajectoryError> {
        let model = self.model(set)?;
        let minutes = model
            .elements
            .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
            .map_err(|e| TrajectoryError::Propagation(e.to_string()))?;
        let prediction = model.constants.propagate(minutes)?;
        Ok(prediction.position)
    }
}

/// Period for a mean motion given in revolutions per day.
pub fn period_from_mean_motion(revs_per_day: f64) -> Result<Duration, TrajectoryError> {
    if !revs_per_day.is_finite() || revs_per_day <= 0.0 {
        return Err(TrajectoryError::InvalidElementSet(format!(
            "mean motion {revs_per_day} rev/day"
        )));
    }
    let seconds = MINUTES_PER_DAY * 60.0 / revs_per_day;
    Ok(Duration::milliseconds((seconds * 1000.0).round() as i64))
}

/// Source of "now" for the trajectory computers.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::testing::ISS;
    use chrono::TimeZone;

    #[test]
    fn period_of_iss() {
        let propagator = Sgp4Propagator::new();
        let set = ElementSet::new(ISS.0, ISS.1);
        let period = propagator.period(&set).unwrap();
        // 1440 / 15.495 rev/day
        assert!((period.num_seconds() - 5576).abs() <= 1);
    }

    #[test]
    fn propagates_to_leo_radius() {
        let propagator = Sgp4Propagator::new();
        let set = ElementSet::new(ISS.0, ISS.1);
        let at = Utc.with_ymd_and_hms(2020, 7, 13, 0, 0, 0).unwrap();
        let pos = propagator.propagate(&set, at).unwrap();
        let r = (pos[0] * pos[0] + pos[1] * pos[1] + pos[2] * pos[2]).sqrt();
        assert!(r > 6600.0 && r < 6900.0, "radius {r}");
    }

    #[test]
    fn garbage_lines_are_rejected() {
        let propagator = Sgp4Propagator::new();
        let set = ElementSet::new("1 nonsense", "2 nonsense");
        assert!(matches!(
            propagator.period(&set),
            Err(TrajectoryError::InvalidElementSet(_))
        ));
    }

    #[test]
    fn zero_mean_motion_has_no_period() {
        assert!(period_from_mean_motion(0.0).is_err());
        assert_eq!(
            period_from_mean_motion(1.0).unwrap(),
            Duration::minutes(1440)
        );
    }
}
