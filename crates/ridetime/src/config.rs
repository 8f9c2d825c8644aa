//! Integration and search settings.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{Time, Velocity},
    time::second,
    velocity::meter_per_second,
};

use crate::error::{ConfigurationError, ensure_non_negative, ensure_positive};

/// Settings for one course integration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SimulationConfig {
    /// Fixed Euler step.
    pub step: Time,
    /// Minimum time between two front shifts.
    pub front_lockout: Time,
    /// Minimum time between two rear shifts.
    pub rear_lockout: Time,
    /// Elapsed time after which an unfinished run is abandoned.
    pub max_elapsed: Time,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            step: Time::new::<second>(0.1),
            front_lockout: Time::new::<second>(10.0),
            rear_lockout: Time::new::<second>(1.0),
            max_elapsed: Time::new::<second>(1.0e6),
        }
    }
}

impl SimulationConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the step or time limit is not
    /// positive, or a lockout is negative.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ensure_positive(self.step.get::<second>(), "simulation step")?;
        ensure_non_negative(self.front_lockout.get::<second>(), "front lockout")?;
        ensure_non_negative(self.rear_lockout.get::<second>(), "rear lockout")?;
        ensure_positive(self.max_elapsed.get::<second>(), "max elapsed time")
    }
}

/// Brackets and iteration counts for the ride estimators.
///
/// Every search starts at zero and runs its full iteration count.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SolverConfig {
    pub simulation: SimulationConfig,
    /// Upper end of the duration search.
    pub max_duration: Time,
    pub duration_iters: usize,
    /// Upper end of the power search, per kilogram of rider weight.
    pub max_power_per_kg: f64,
    pub power_iters: usize,
    /// Upper end of the steady speed search.
    pub max_speed: Velocity,
    pub speed_iters: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            max_duration: Time::new::<second>(10_000.0),
            duration_iters: 30,
            max_power_per_kg: 30.0,
            power_iters: 30,
            max_speed: Velocity::new::<meter_per_second>(100.0),
            speed_iters: 100,
        }
    }
}

impl SolverConfig {
    /// Validates the configuration, including the nested simulation settings.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if a bracket end is not positive or
    /// an iteration count is zero.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.simulation.validate()?;
        ensure_positive(self.max_duration.get::<second>(), "max duration")?;
        ensure_positive(self.max_power_per_kg, "max power per kg")?;
        ensure_positive(self.max_speed.get::<meter_per_second>(), "max speed")?;

        if self.duration_iters == 0 || self.power_iters == 0 || self.speed_iters == 0 {
            return Err(ConfigurationError::Solver {
                reason: "iteration counts must be at least 1",
            });
        }
        Ok(())
    }
}
