//! Equations of motion for rider plus bicycle.
//!
//! The coefficients are empirical approximations rather than a first-principles
//! aerodynamic model. Air resistance in particular uses a fixed coefficient
//! even though the real value depends on frontal area and air temperature.

mod mass;

pub use mass::MassModel;

use uom::si::{
    acceleration::meter_per_second_squared,
    f64::{Acceleration, Force, Power, Velocity},
    force::newton,
    length::meter,
    power::watt,
    velocity::meter_per_second,
};

use crate::{Bicycle, RiderParams, error::InvalidInputError};

/// Gravitational acceleration in m/s².
pub const GRAVITY: f64 = 9.8;

/// Air resistance coefficient `K` in `K · v²` (N·s²/m²).
pub const AIR_RESISTANCE: f64 = 0.15;

/// Rolling resistance coefficient, applied only while moving.
pub const ROLLING_RESISTANCE: f64 = 0.005;

/// Fraction of body weight a rider can push through the crank arm.
const PEDAL_FORCE_FACTOR: f64 = 0.7;

/// Force and resistance model for one rider on one bicycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dynamics {
    mass: MassModel,
    wheel_radius: f64,
    crank_length: f64,
}

impl Dynamics {
    #[must_use]
    pub fn new(params: &RiderParams, bicycle: &Bicycle) -> Self {
        Self {
            mass: MassModel::new(params, bicycle),
            wheel_radius: bicycle.front_wheel.radius.get::<meter>(),
            crank_length: bicycle.crank.length.get::<meter>(),
        }
    }

    #[must_use]
    pub fn mass(&self) -> &MassModel {
        &self.mass
    }

    /// Pedal-force ceiling from crank-arm leverage.
    #[must_use]
    pub fn max_force(&self) -> Force {
        Force::new::<newton>(self.max_force_si())
    }

    /// Returns the acceleration produced by `power` at `velocity` on a slope
    /// of `grade_percent`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::NegativeVelocity`] if `velocity < 0`.
    pub fn acceleration(
        &self,
        power: Power,
        velocity: Velocity,
        grade_percent: f64,
    ) -> Result<Acceleration, InvalidInputError> {
        let a = self.acceleration_si(
            power.get::<watt>(),
            velocity.get::<meter_per_second>(),
            grade_percent,
        )?;
        Ok(Acceleration::new::<meter_per_second_squared>(a))
    }

    /// Returns the power needed to hold `velocity` on `grade_percent` against
    /// a head wind of `wind` (negative for a tail wind).
    ///
    /// This is the linearized steady-state relation used by the speed search;
    /// the tick-by-tick integrator never calls it.
    #[must_use]
    pub fn steady_power(&self, velocity: Velocity, grade_percent: f64, wind: Velocity) -> Power {
        Power::new::<watt>(self.steady_power_si(
            velocity.get::<meter_per_second>(),
            grade_percent,
            wind.get::<meter_per_second>(),
        ))
    }

    fn max_force_si(&self) -> f64 {
        self.mass.total_mass * GRAVITY * self.crank_length / self.wheel_radius * PEDAL_FORCE_FACTOR
    }

    pub(crate) fn acceleration_si(
        &self,
        power: f64,
        velocity: f64,
        grade_percent: f64,
    ) -> Result<f64, InvalidInputError> {
        if velocity < 0.0 {
            return Err(InvalidInputError::NegativeVelocity { velocity });
        }

        let mass = self.mass.total_mass;
        let radius = self.wheel_radius;
        let max_force = self.max_force_si();

        let mut resistance = 0.0;

        // Standing start: full pedal force, no rolling resistance yet.
        #[allow(clippy::float_cmp)]
        let force = if velocity == 0.0 {
            max_force
        } else {
            resistance += ROLLING_RESISTANCE * mass * GRAVITY;
            (power / velocity).min(max_force)
        };

        resistance += 0.01 * grade_percent * mass * GRAVITY;
        resistance += AIR_RESISTANCE * velocity * velocity;

        let r2 = radius * radius;
        Ok((force - resistance) * r2 / (r2 * mass + self.mass.total_inertia))
    }

    pub(crate) fn steady_power_si(&self, velocity: f64, grade_percent: f64, wind: f64) -> f64 {
        let air = velocity + wind;
        velocity
            * ((0.1 * grade_percent + 0.05) * self.mass.total_mass + AIR_RESISTANCE * air * air)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::test_utils;

    fn dynamics() -> Dynamics {
        Dynamics::new(&test_utils::rider_params(), &test_utils::road_bike())
    }

    fn accel(power: f64, velocity: f64, grade: f64) -> f64 {
        dynamics()
            .acceleration_si(power, velocity, grade)
            .expect("non-negative velocity")
    }

    #[test]
    fn max_force_from_crank_leverage() {
        // 79 kg * 9.8 * 0.17 / 0.335 * 0.7
        let expected = 79.0 * 9.8 * 0.17 / 0.335 * 0.7;
        assert_relative_eq!(dynamics().max_force().get::<newton>(), expected, epsilon = 1e-9);
    }

    #[test]
    fn standing_start_uses_max_force() {
        let d = dynamics();
        let r2 = 0.335 * 0.335;
        let expected = d.max_force_si() * r2 / (r2 * 79.0 + 0.2);

        // Power is irrelevant at zero velocity.
        assert_relative_eq!(accel(0.0, 0.0, 0.0), expected, epsilon = 1e-12);
        assert_relative_eq!(accel(500.0, 0.0, 0.0), expected, epsilon = 1e-12);
    }

    #[test]
    fn moving_on_the_flat() {
        let r2 = 0.335 * 0.335;
        let force = 200.0 / 8.0;
        let resistance = 0.005 * 79.0 * 9.8 + 0.15 * 64.0;
        let expected = (force - resistance) * r2 / (r2 * 79.0 + 0.2);

        assert_relative_eq!(accel(200.0, 8.0, 0.0), expected, epsilon = 1e-12);
    }

    #[test]
    fn force_is_capped_at_low_speed() {
        // 10 kW at 1 m/s would exceed the pedal-force ceiling.
        let capped = accel(10_000.0, 1.0, 0.0);
        let also_capped = accel(20_000.0, 1.0, 0.0);
        assert_relative_eq!(capped, also_capped);
    }

    #[test]
    fn rejects_negative_velocity() {
        let result = dynamics().acceleration(
            Power::new::<watt>(200.0),
            Velocity::new::<meter_per_second>(-0.1),
            0.0,
        );
        assert_eq!(
            result,
            Err(InvalidInputError::NegativeVelocity { velocity: -0.1 })
        );
    }

    #[test]
    fn acceleration_decreases_with_grade() {
        for velocity in [0.0, 0.5, 3.0, 10.0, 25.0] {
            let mut previous = f64::INFINITY;
            for grade in [-20.0, -8.0, -1.0, 0.0, 2.0, 6.0, 15.0] {
                let a = accel(250.0, velocity, grade);
                assert!(a.is_finite());
                assert!(a < previous, "v = {velocity}, grade = {grade}");
                previous = a;
            }
        }
    }

    #[test]
    fn steady_power_matches_formula() {
        let d = dynamics();
        let p = d.steady_power(
            Velocity::new::<meter_per_second>(10.0),
            2.0,
            Velocity::new::<meter_per_second>(0.0),
        );
        let expected = 10.0 * ((0.1 * 2.0 + 0.05) * 79.0 + 0.15 * 100.0);
        assert_relative_eq!(p.get::<watt>(), expected, epsilon = 1e-9);
    }

    #[test]
    fn head_wind_costs_power() {
        let d = dynamics();
        let v = Velocity::new::<meter_per_second>(8.0);
        let calm = d.steady_power(v, 0.0, Velocity::new::<meter_per_second>(0.0));
        let head = d.steady_power(v, 0.0, Velocity::new::<meter_per_second>(3.0));
        let tail = d.steady_power(v, 0.0, Velocity::new::<meter_per_second>(-3.0));
        assert!(tail < calm && calm < head);
    }
}
