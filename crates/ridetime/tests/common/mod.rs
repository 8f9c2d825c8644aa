#![allow(dead_code)]

use ridetime::{
    Bicycle, Crank, CriticalPowerTable, Level, Rider, RiderParams, Shift, Sprocket, Wheel,
};
use uom::si::{
    f64::{Length, Mass},
    length::meter,
    mass::kilogram,
    time::second,
};

pub const FRONT_LOCKOUT: f64 = 10.0;
pub const REAR_LOCKOUT: f64 = 1.0;

pub fn road_bike() -> Bicycle {
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

pub fn rider_params() -> RiderParams {
    RiderParams::new(Length::new::<meter>(1.75), Mass::new::<kilogram>(70.0))
}

pub fn rider() -> Rider {
    rider_with(rider_params())
}

pub fn rider_with(params: RiderParams) -> Rider {
    Rider::new(
        params,
        road_bike(),
        Level::new(4),
        CriticalPowerTable::default(),
    )
    .expect("valid rider")
}

/// Asserts that every shift in `trace` respects the lockouts and moves each
/// axle by at most one position.
pub fn assert_hysteresis(trace: &[Shift]) {
    let mut last_front: Option<f64> = None;
    let mut last_rear: Option<f64> = None;

    for pair in trace.windows(2) {
        let (before, after) = (pair[0], pair[1]);
        let time = after.time.get::<second>();

        assert!(before.gear.front.abs_diff(after.gear.front) <= 1);
        assert!(before.gear.rear.abs_diff(after.gear.rear) <= 1);

        if before.gear.front != after.gear.front {
            if let Some(last) = last_front {
                assert!(
                    time - last >= FRONT_LOCKOUT - 1e-9,
                    "front shifts at {last} and {time}"
                );
            }
            last_front = Some(time);
        }

        if before.gear.rear != after.gear.rear {
            if let Some(last) = last_rear {
                assert!(
                    time - last >= REAR_LOCKOUT - 1e-9,
                    "rear shifts at {last} and {time}"
                );
            }
            last_rear = Some(time);
        }
    }
}

/// Asserts that every gear in `trace` exists on `bike`.
pub fn assert_legal_gears(trace: &[Shift], bike: &Bicycle) {
    for shift in trace {
        assert!(shift.gear.front < bike.crank.chainrings.len());
        assert!(shift.gear.rear < bike.sprocket.cogs.len());
    }
}
