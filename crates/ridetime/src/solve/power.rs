use std::convert::Infallible;

use ridetime_solvers::{BisectionProblem, Direction, Model};
use uom::si::{
    f64::{Power, Time},
    power::watt,
};

use crate::{Course, FatigueModel, Ride, Rider, error::SimulationError};

/// Rides the course at a constant power.
pub(super) struct CourseModel<'a, M: FatigueModel> {
    pub(super) rider: &'a Rider<M>,
    pub(super) course: &'a Course,
}

impl<M: FatigueModel> Model for CourseModel<'_, M> {
    type Input = Power;
    type Output = Ride;
    type Error = SimulationError;

    fn call(&self, power: &Power) -> Result<Ride, SimulationError> {
        self.rider.simulate(self.course, power)
    }
}

/// Searches for the power that finishes in `target`.
pub(super) struct PowerProblem {
    pub(super) target: Time,
}

impl BisectionProblem for PowerProblem {
    type Input = Power;
    type Output = Ride;
    type Error = Infallible;

    fn input(&self, x: f64) -> Result<Power, Infallible> {
        Ok(Power::new::<watt>(x))
    }

    fn direction(&self, _power: &Power, ride: &Ride) -> Result<Direction, Infallible> {
        Ok(if ride.elapsed > self.target {
            Direction::Up
        } else {
            Direction::Down
        })
    }
}
