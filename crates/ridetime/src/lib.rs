//! Ride-time estimation for a cyclist on a geared bicycle.
//!
//! A [`Rider`] combines body parameters, a [`Bicycle`] and a fitness
//! [`Level`] from a [`FatigueModel`]. Given a [`Course`] it can:
//!
//! - ride it once at a given power ([`Rider::simulate`])
//! - estimate the time it takes at the rider's own pace
//!   ([`Rider::time_for_course`])
//! - estimate the power needed to finish in a given time
//!   ([`Rider::power_for_duration`])
//! - estimate steady speed on a grade ([`Rider::speed_for_grade`])
//! - place an effort between fitness levels ([`Rider::classify_level`])
//!
//! Rides are integrated with a fixed time step while a gear controller picks
//! a chainring and cog at every tick. When the gearing cannot keep the rider
//! at cadence the [`Ride`] carries [`Advice`] on which tooth counts to change.
//!
//! ```no_run
//! use ridetime::{
//!     Bicycle, Course, Crank, CriticalPowerTable, Level, Rider, RiderParams, Sprocket, Wheel,
//! };
//! use uom::si::{
//!     f64::{Length, Mass},
//!     length::meter,
//!     mass::kilogram,
//!     time::second,
//! };
//!
//! let wheel = Wheel::from_si(0.335, 0.1, 1.0);
//! let bicycle = Bicycle {
//!     front_weight: Mass::new::<kilogram>(4.0),
//!     rear_weight: Mass::new::<kilogram>(5.0),
//!     front_wheel: wheel,
//!     rear_wheel: wheel,
//!     crank: Crank::new(0.17, vec![34, 50]),
//!     sprocket: Sprocket::new(vec![11, 12, 13, 14, 15, 17, 19, 21, 24, 28, 32]),
//! };
//! let params = RiderParams::new(Length::new::<meter>(1.75), Mass::new::<kilogram>(70.0));
//! let rider = Rider::new(params, bicycle, Level::new(4), CriticalPowerTable::default())?;
//!
//! let course = Course::from_meters([(5000.0, 250.0)])?;
//! let ride = rider.time_for_course(&course, None)?;
//! println!("{:.0} s\n{}", ride.elapsed.get::<second>(), ride.advice);
//! # Ok::<(), ridetime::Error>(())
//! ```

mod advice;
mod bicycle;
mod config;
mod course;
mod error;
mod fatigue;
mod gearing;
mod rider;
mod simulate;
mod solve;

pub mod dynamics;

#[cfg(test)]
mod test_utils;

pub use advice::{Advice, LowGearAdvice, TopGearAdvice};
pub use bicycle::{Bicycle, Crank, Sprocket, Wheel};
pub use config::{SimulationConfig, SolverConfig};
pub use course::{Course, CourseSegment};
pub use dynamics::{Dynamics, MassModel};
pub use error::{ConfigurationError, Error, InvalidInputError, SimulationError};
pub use fatigue::{
    CriticalPower, CriticalPowerCurve, CriticalPowerTable, FatigueCurve, FatigueModel, Level,
};
pub use gearing::{Gear, GearReport, Shift};
pub use rider::{Rider, RiderParams};
pub use simulate::{PowerSource, Ride};
pub use solve::PowerEstimate;
