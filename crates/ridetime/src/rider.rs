use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uom::si::{
    angular_velocity::revolution_per_minute,
    f64::{AngularVelocity, Length, Mass, Power, Time},
    length::meter,
    mass::kilogram,
    power::watt,
};

use crate::{
    Bicycle, Course, CriticalPowerTable, Dynamics, FatigueCurve, FatigueModel, Level, Ride,
    SolverConfig,
    error::{ConfigurationError, SimulationError, ensure_non_negative, ensure_positive},
    gearing::Gearing,
    simulate::{self, PowerSource},
};

/// Body measurements and pedalling cadence of a rider.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RiderParams {
    pub height: Length,
    pub weight: Mass,
    /// Cadence the gear controller tries to hold.
    pub cadence: AngularVelocity,
}

impl RiderParams {
    /// Creates rider parameters with a cadence of 90 rpm.
    #[must_use]
    pub fn new(height: Length, weight: Mass) -> Self {
        Self {
            height,
            weight,
            cadence: AngularVelocity::new::<revolution_per_minute>(90.0),
        }
    }

    #[must_use]
    pub fn with_cadence(self, cadence: AngularVelocity) -> Self {
        Self { cadence, ..self }
    }

    /// Checks that weight and cadence are positive.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ensure_non_negative(self.height.get::<meter>(), "rider height")?;
        ensure_positive(self.weight.get::<kilogram>(), "rider weight")?;
        ensure_positive(
            self.cadence.get::<revolution_per_minute>(),
            "rider cadence",
        )
    }
}

/// A rider on a bicycle, with a fitness level and a fatigue model.
///
/// Construction validates all parameters and derives everything the
/// simulation needs up front, so a `Rider` is always ready to ride. The
/// fatigue curve for the current level is cached and only changes through
/// [`Rider::set_level`].
pub struct Rider<M: FatigueModel = CriticalPowerTable> {
    params: RiderParams,
    bicycle: Bicycle,
    level: Level,
    fatigue: M,
    curve: M::Curve,
    dynamics: Dynamics,
    pub(crate) gearing: Gearing,
    pub(crate) config: SolverConfig,
}

impl<M: FatigueModel> Rider<M> {
    /// Creates a rider with the default [`SolverConfig`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the rider parameters or the
    /// bicycle are invalid.
    pub fn new(
        params: RiderParams,
        bicycle: Bicycle,
        level: Level,
        fatigue: M,
    ) -> Result<Self, ConfigurationError> {
        params.validate()?;
        bicycle.validate()?;

        Ok(Self {
            dynamics: Dynamics::new(&params, &bicycle),
            gearing: Gearing::new(&params, &bicycle),
            curve: fatigue.curve(level),
            params,
            bicycle,
            level,
            fatigue,
            config: SolverConfig::default(),
        })
    }

    /// Replaces the solver configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if `config` is invalid.
    pub fn with_config(self, config: SolverConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self { config, ..self })
    }

    /// Changes the fitness level and the fatigue curve that goes with it.
    pub fn set_level(&mut self, level: Level) {
        self.curve = self.fatigue.curve(level);
        self.level = level;
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn params(&self) -> &RiderParams {
        &self.params
    }

    #[must_use]
    pub fn bicycle(&self) -> &Bicycle {
        &self.bicycle
    }

    #[must_use]
    pub fn dynamics(&self) -> &Dynamics {
        &self.dynamics
    }

    #[must_use]
    pub fn fatigue(&self) -> &M {
        &self.fatigue
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Power this rider can sustain for `duration` at the current level.
    #[must_use]
    pub fn natural_power(&self, duration: Time) -> Power {
        let per_kg = self.curve.power_per_kg(duration);
        Power::new::<watt>(per_kg * self.params.weight.get::<kilogram>())
    }

    /// Rides `course` once with power from `power`.
    ///
    /// # Errors
    ///
    /// Returns a [`SimulationError`] if the rider is pushed backwards or the
    /// ride exceeds the configured time limit.
    pub fn simulate<P>(&self, course: &Course, power: &P) -> Result<Ride, SimulationError>
    where
        P: PowerSource + ?Sized,
    {
        simulate::simulate(
            &self.dynamics,
            &self.gearing,
            course,
            power,
            &self.config.simulation,
        )
    }
}

impl<M> fmt::Debug for Rider<M>
where
    M: FatigueModel + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rider")
            .field("params", &self.params)
            .field("bicycle", &self.bicycle)
            .field("level", &self.level)
            .field("fatigue", &self.fatigue)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::second;

    use crate::test_utils;

    #[test]
    fn default_cadence() {
        let params = test_utils::rider_params();
        assert_relative_eq!(params.cadence.get::<revolution_per_minute>(), 90.0);
    }

    #[test]
    fn rejects_weightless_rider() {
        let params = RiderParams::new(Length::new::<meter>(1.8), Mass::new::<kilogram>(0.0));
        let result = Rider::new(
            params,
            test_utils::road_bike(),
            Level::new(4),
            CriticalPowerTable::default(),
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::NotPositive {
                field: "rider weight"
            })
        ));
    }

    #[test]
    fn rejects_invalid_bicycle() {
        let mut bike = test_utils::road_bike();
        bike.sprocket.cogs = vec![11];
        let result = Rider::new(
            test_utils::rider_params(),
            bike,
            Level::new(4),
            CriticalPowerTable::default(),
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::CogCount { count: 1 })
        ));
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SolverConfig {
            speed_iters: 0,
            ..SolverConfig::default()
        };
        assert!(test_utils::rider().with_config(config).is_err());
    }

    #[test]
    fn natural_power_scales_with_weight() {
        let rider = test_utils::rider();
        let ten_minutes = Time::new::<second>(600.0);

        // Level 4 holds 3.3 W/kg for ten minutes.
        assert_relative_eq!(
            rider.natural_power(ten_minutes).get::<watt>(),
            3.3 * 70.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn set_level_replaces_curve() {
        let mut rider = test_utils::rider();
        let hour = Time::new::<second>(3600.0);
        let before = rider.natural_power(hour);

        rider.set_level(Level::new(6));
        assert_eq!(rider.level(), Level::new(6));
        assert!(rider.natural_power(hour) > before);

        rider.set_level(Level::new(4));
        assert_eq!(rider.natural_power(hour), before);
    }

    #[test]
    fn custom_fatigue_model() {
        struct Flat;

        impl FatigueModel for Flat {
            type Curve = fn(Time) -> f64;

            fn curve(&self, _level: Level) -> Self::Curve {
                |_| 4.0
            }

            fn classify(&self, _duration: Time, _power_per_kg: f64) -> (Level, Level) {
                (Level::new(1), Level::new(1))
            }
        }

        let rider = Rider::new(
            test_utils::rider_params(),
            test_utils::road_bike(),
            Level::new(1),
            Flat,
        )
        .unwrap();

        assert_relative_eq!(
            rider.natural_power(Time::new::<second>(10.0)).get::<watt>(),
            280.0
        );
    }
}
