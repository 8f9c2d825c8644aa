//! Fixed-step integration of a ride over a course.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;
use uom::si::{
    f64::{Power, Time},
    length::meter,
    power::watt,
    time::second,
};

use crate::{
    Advice, Course, Dynamics, GearReport, Shift, SimulationConfig,
    error::SimulationError,
    gearing::{GearState, Gearing},
};

/// Supplies the rider's power output as the ride goes on.
pub trait PowerSource {
    /// Returns the power applied once `elapsed` time has passed.
    fn power_at(&self, elapsed: Time) -> Power;
}

impl PowerSource for Power {
    fn power_at(&self, _elapsed: Time) -> Power {
        *self
    }
}

impl<F> PowerSource for F
where
    F: Fn(Time) -> Power,
{
    fn power_at(&self, elapsed: Time) -> Power {
        self(elapsed)
    }
}

/// The outcome of riding a course.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ride {
    pub elapsed: Time,
    /// Engaged gears, starting with the initial gear at time zero.
    pub trace: Vec<Shift>,
    pub report: GearReport,
    pub advice: Advice,
}

/// Integrates one ride over `course`.
///
/// Each tick evaluates the power source at the elapsed time, takes one
/// forward Euler step, then lets the gear controller react to the new
/// velocity. When the acceleration repeats exactly between two ticks the
/// rest of the segment is covered at constant velocity in a single step.
pub(crate) fn simulate<P>(
    dynamics: &Dynamics,
    gearing: &Gearing,
    course: &Course,
    power: &P,
    config: &SimulationConfig,
) -> Result<Ride, SimulationError>
where
    P: PowerSource + ?Sized,
{
    let step = config.step.get::<second>();
    let limit = config.max_elapsed.get::<second>();

    let mut state = GearState::new(gearing, config.front_lockout, config.rear_lockout);
    let mut trace = vec![Shift {
        time: Time::new::<second>(0.0),
        gear: state.gear(),
    }];

    let mut elapsed = 0.0;
    let mut velocity = 0.0;

    for segment in course.segments() {
        let distance = segment.distance.get::<meter>();
        let grade = segment.grade_percent();

        let mut covered = 0.0;
        let mut previous = None;

        while covered < distance {
            let power = power.power_at(Time::new::<second>(elapsed)).get::<watt>();
            let acceleration = dynamics.acceleration_si(power, velocity, grade)?;

            if previous == Some(acceleration) && velocity > 0.0 {
                elapsed += (distance - covered) / velocity;
                covered = distance;
            } else {
                velocity += acceleration * step;
                covered += velocity * step;
                elapsed += step;
            }
            previous = Some(acceleration);

            if let Some(gear) = state.select(gearing, velocity, elapsed) {
                trace.push(Shift {
                    time: Time::new::<second>(elapsed),
                    gear,
                });
            }

            if elapsed > limit {
                return Err(SimulationError::Stalled { limit });
            }
        }
    }

    let report = state.report();
    debug!(
        elapsed,
        shifts = trace.len() - 1,
        lowgear = report.lowgear,
        topgear = report.topgear,
        "course simulated"
    );

    Ok(Ride {
        elapsed: Time::new::<second>(elapsed),
        trace,
        report,
        advice: Advice::for_gearing(&report, gearing),
    })
}
