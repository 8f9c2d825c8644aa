use std::convert::Infallible;

use ridetime_solvers::{BisectionProblem, Direction, Model};
use uom::si::{
    f64::{Power, Velocity},
    velocity::meter_per_second,
};

use crate::Dynamics;

/// Steady-state power needed to hold a velocity on a fixed grade in still air.
pub(super) struct SteadyPowerModel<'a> {
    pub(super) dynamics: &'a Dynamics,
    pub(super) grade_percent: f64,
}

impl Model for SteadyPowerModel<'_> {
    type Input = Velocity;
    type Output = Power;
    type Error = Infallible;

    fn call(&self, velocity: &Velocity) -> Result<Power, Infallible> {
        let still = Velocity::new::<meter_per_second>(0.0);
        Ok(self
            .dynamics
            .steady_power(*velocity, self.grade_percent, still))
    }
}

/// Searches for the velocity at which the required power meets `power`.
pub(super) struct SpeedProblem {
    pub(super) power: Power,
}

impl BisectionProblem for SpeedProblem {
    type Input = Velocity;
    type Output = Power;
    type Error = Infallible;

    fn input(&self, x: f64) -> Result<Velocity, Infallible> {
        Ok(Velocity::new::<meter_per_second>(x))
    }

    fn direction(&self, _velocity: &Velocity, required: &Power) -> Result<Direction, Infallible> {
        Ok(if *required < self.power {
            Direction::Up
        } else {
            Direction::Down
        })
    }
}
