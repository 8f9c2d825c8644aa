use thiserror::Error;

use ridetime_solvers::bisection;

/// Errors raised by the force model for inputs outside its domain.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidInputError {
    /// The model only describes forward motion.
    #[error("velocity must not be negative, got {velocity} m/s")]
    NegativeVelocity { velocity: f64 },
}

/// Errors raised when building parameter records, courses, or configs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("{field} must be positive and finite")]
    NotPositive { field: &'static str },

    #[error("{field} must be non-negative and finite")]
    Negative { field: &'static str },

    #[error("crank needs exactly two chainrings, got {count}")]
    ChainringCount { count: usize },

    #[error("sprocket needs at least two cogs, got {count}")]
    CogCount { count: usize },

    #[error("{part} tooth counts must be positive and strictly ascending")]
    UnsortedTeeth { part: &'static str },

    #[error("course has no segments")]
    EmptyCourse,

    #[error("course segment {index} needs a positive distance and finite elevation")]
    SegmentDistance { index: usize },

    #[error("invalid fatigue table: {reason}")]
    FatigueTable { reason: &'static str },

    #[error("invalid solver configuration: {reason}")]
    Solver { reason: &'static str },
}

/// Errors that can end a course simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    /// The run exceeded the configured time limit without covering the course.
    #[error("simulation passed {limit} s without finishing the course")]
    Stalled { limit: f64 },
}

/// Errors returned by the ride estimators.
#[derive(Debug, Error)]
pub enum Error {
    #[error("simulation failed")]
    Simulation(#[from] SimulationError),

    #[error("search failed")]
    Solver(#[source] bisection::Error),

    #[error("invalid configuration")]
    Configuration(#[from] ConfigurationError),
}

impl From<bisection::Error> for Error {
    /// Unwraps simulation failures that surfaced through a solver model call.
    fn from(err: bisection::Error) -> Self {
        match err {
            bisection::Error::Model(source) => match source.downcast::<SimulationError>() {
                Ok(simulation) => Self::Simulation(*simulation),
                Err(source) => Self::Solver(bisection::Error::Model(source)),
            },
            other => Self::Solver(other),
        }
    }
}

pub(crate) fn ensure_positive(value: f64, field: &'static str) -> Result<(), ConfigurationError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::NotPositive { field })
    }
}

pub(crate) fn ensure_non_negative(
    value: f64,
    field: &'static str,
) -> Result<(), ConfigurationError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::Negative { field })
    }
}

/// Checks that tooth counts are non-zero and strictly ascending.
pub(crate) fn ensure_ascending_teeth(
    teeth: &[u32],
    part: &'static str,
) -> Result<(), ConfigurationError> {
    let positive = teeth.iter().all(|&t| t > 0);
    let ascending = teeth.windows(2).all(|pair| pair[0] < pair[1]);

    if positive && ascending {
        Ok(())
    } else {
        Err(ConfigurationError::UnsortedTeeth { part })
    }
}
