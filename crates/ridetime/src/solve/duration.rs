use std::convert::Infallible;

use ridetime_solvers::{BisectionProblem, Direction, Model};
use uom::si::{f64::Time, time::second};

use crate::{Course, FatigueModel, Ride, Rider, error::SimulationError};

/// Rides the course at the power the rider could hold for a candidate duration.
pub(super) struct DurationModel<'a, M: FatigueModel> {
    pub(super) rider: &'a Rider<M>,
    pub(super) course: &'a Course,
}

impl<M: FatigueModel> Model for DurationModel<'_, M> {
    type Input = Time;
    type Output = Ride;
    type Error = SimulationError;

    fn call(&self, duration: &Time) -> Result<Ride, SimulationError> {
        let power = self.rider.natural_power(*duration);
        self.rider.simulate(self.course, &power)
    }
}

/// Searches for the duration that the ride itself takes.
pub(super) struct DurationProblem;

impl BisectionProblem for DurationProblem {
    type Input = Time;
    type Output = Ride;
    type Error = Infallible;

    fn input(&self, x: f64) -> Result<Time, Infallible> {
        Ok(Time::new::<second>(x))
    }

    fn direction(&self, duration: &Time, ride: &Ride) -> Result<Direction, Infallible> {
        // A candidate shorter than the ride it produces is too optimistic.
        Ok(if *duration < ride.elapsed {
            Direction::Up
        } else {
            Direction::Down
        })
    }
}
