//! Ride estimators built on fixed-iteration bisection.
//!
//! Each estimator wraps the course integrator (or the steady-power relation)
//! in a [`Model`](ridetime_solvers::Model), pairs it with a
//! [`BisectionProblem`](ridetime_solvers::BisectionProblem) that says which
//! way to move, and runs the configured number of halvings from zero.

mod duration;
mod power;
mod speed;

use ridetime_solvers::bisection::{self, Action, Event};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use uom::si::{
    f64::{Power, Time, Velocity},
    mass::kilogram,
    power::watt,
    time::second,
    velocity::meter_per_second,
};

use crate::{Course, FatigueModel, Level, Ride, Rider, error::Error};

use self::{
    duration::{DurationModel, DurationProblem},
    power::{CourseModel, PowerProblem},
    speed::{SpeedProblem, SteadyPowerModel},
};

/// The power needed to ride a course in a given time, with the ride it produced.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PowerEstimate {
    pub power: Power,
    pub ride: Ride,
}

impl<M: FatigueModel> Rider<M> {
    /// Estimates how long this rider takes to ride `course`.
    ///
    /// With a fixed `power` the course is ridden once at that power.
    /// Otherwise the rider rides at the power they could sustain for a
    /// candidate duration, and the duration is bisected until it agrees with
    /// the ride it produces. The returned ride carries the final candidate as
    /// its elapsed time, with the trace and advice of the last run.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if a simulation fails or the search is
    /// misconfigured.
    pub fn time_for_course(&self, course: &Course, power: Option<Power>) -> Result<Ride, Error> {
        if let Some(power) = power {
            let ride = self.simulate(course, &power)?;
            debug!(
                power = power.get::<watt>(),
                elapsed = ride.elapsed.get::<second>(),
                "course ridden at fixed power"
            );
            warn_on_advice(&ride);
            return Ok(ride);
        }

        let model = DurationModel {
            rider: self,
            course,
        };
        let observer = |event: &Event<'_, Time, Ride>| -> Option<Action> {
            trace!(
                iter = event.iter,
                candidate = event.x,
                elapsed = event.snapshot.output.elapsed.get::<second>(),
                "duration search"
            );
            None
        };

        let solution = bisection::solve(
            &model,
            &DurationProblem,
            [0.0, self.config.max_duration.get::<second>()],
            &bisection::Config::with_iters(self.config.duration_iters),
            observer,
        )?;

        let mut ride = solution.snapshot.into_output();
        ride.elapsed = Time::new::<second>(solution.x);

        debug!(
            level = %self.level(),
            elapsed = solution.x,
            iters = solution.iters,
            "course duration estimated"
        );
        warn_on_advice(&ride);
        Ok(ride)
    }

    /// Estimates the constant power needed to ride `course` in `target`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if a simulation fails or the search is
    /// misconfigured.
    pub fn power_for_duration(
        &self,
        course: &Course,
        target: Time,
    ) -> Result<PowerEstimate, Error> {
        let model = CourseModel {
            rider: self,
            course,
        };
        let problem = PowerProblem { target };
        let max_power = self.config.max_power_per_kg * self.params().weight.get::<kilogram>();

        let observer = |event: &Event<'_, Power, Ride>| -> Option<Action> {
            trace!(
                iter = event.iter,
                power = event.x,
                elapsed = event.snapshot.output.elapsed.get::<second>(),
                "power search"
            );
            None
        };

        let solution = bisection::solve(
            &model,
            &problem,
            [0.0, max_power],
            &bisection::Config::with_iters(self.config.power_iters),
            observer,
        )?;

        debug!(
            target = target.get::<second>(),
            power = solution.x,
            iters = solution.iters,
            "course power estimated"
        );

        let ride = solution.snapshot.into_output();
        warn_on_advice(&ride);
        Ok(PowerEstimate {
            power: Power::new::<watt>(solution.x),
            ride,
        })
    }

    /// Estimates the steady speed this rider holds at `power` on a constant
    /// grade in still air.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the search is misconfigured.
    pub fn speed_for_grade(&self, power: Power, grade_percent: f64) -> Result<Velocity, Error> {
        let model = SteadyPowerModel {
            dynamics: self.dynamics(),
            grade_percent,
        };
        let problem = SpeedProblem { power };

        let solution = bisection::solve_unobserved(
            &model,
            &problem,
            [0.0, self.config.max_speed.get::<meter_per_second>()],
            &bisection::Config::with_iters(self.config.speed_iters),
        )?;

        debug!(
            power = power.get::<watt>(),
            grade_percent,
            speed = solution.x,
            "steady speed estimated"
        );
        Ok(Velocity::new::<meter_per_second>(solution.x))
    }

    /// Returns the pair of fitness levels that bracket holding `power` for
    /// `duration`, lowest first.
    #[must_use]
    pub fn classify_level(&self, duration: Time, power: Power) -> (Level, Level) {
        let per_kg = power.get::<watt>() / self.params().weight.get::<kilogram>();
        self.fatigue().classify(duration, per_kg)
    }
}

fn warn_on_advice(ride: &Ride) {
    if !ride.advice.is_empty() {
        warn!(
            lowgear = ride.report.lowgear,
            topgear = ride.report.topgear,
            advice = %ride.advice,
            "gearing could not hold cadence"
        );
    }
}
