//! Shared fixtures for unit tests.

use uom::si::{
    f64::{Length, Mass},
    length::meter,
    mass::kilogram,
};

use crate::{Bicycle, Crank, CriticalPowerTable, Level, Rider, RiderParams, Sprocket, Wheel};

/// A compact-crank road bike with an 11-speed 11-32 cassette.
pub(crate) fn road_bike() -> Bicycle {
    let wheel = Wheel::from_si(0.335, 0.1, 1.0);
    Bicycle {
        front_weight: Mass::new::<kilogram>(4.0),
        rear_weight: Mass::new::<kilogram>(5.0),
        front_wheel: wheel,
        rear_wheel: wheel,
        crank: Crank::new(0.17, vec![34, 50]),
        sprocket: Sprocket::new(vec![11, 12, 13, 14, 15, 17, 19, 21, 24, 28, 32]),
    }
}

/// A 70 kg rider at the default cadence.
pub(crate) fn rider_params() -> RiderParams {
    RiderParams::new(Length::new::<meter>(1.75), Mass::new::<kilogram>(70.0))
}

/// [`rider_params`] on [`road_bike`] at level 4 of the default table.
pub(crate) fn rider() -> Rider {
    Rider::new(
        rider_params(),
        road_bike(),
        Level::new(4),
        CriticalPowerTable::default(),
    )
    .expect("fixture is valid")
}
