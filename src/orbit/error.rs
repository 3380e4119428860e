use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("no element set for {0}")]
    MissingElementSet(String),
    #[error("invalid element set: {0}")]
    InvalidElementSet(String),
    #[error("propagation error: {0}")]
    Propagation(String),
    #[error("no antimeridian crossing within {0} minutes")]
    DegenerateOrbitSearch(i64),
    #[error("sampling step must be positive")]
    InvalidStep,
    #[error("orbit trace needs at least 2 points, got {0}")]
    InvalidPointCount(usize),
}

impl From<sgp4::TleError> for TrajectoryError {
    fn from(err: sgp4::TleError) -> Self {
        TrajectoryError::InvalidElementSet(err.to_string())
    }
}

impl From<sgp4::ElementsError> for TrajectoryError {
    fn from(err: sgp4::ElementsError) -> Self {
        TrajectoryError::InvalidElementSet(err.to_string())
    }
}

impl From<sgp4::Error> for TrajectoryError {
    fn from(err: sgp4::Error) -> Self {
        TrajectoryError::Propagation(err.to_string())
    }
}
