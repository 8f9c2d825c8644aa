//! Estimates a hill climb for a level 5 rider on a compact road bike.
//!
//! Run with:
//! ```
//! RUST_LOG=ridetime=debug cargo run --example hill_climb
//! ```

use std::error::Error;

use ridetime::{
    Bicycle, Course, Crank, CriticalPowerTable, Level, Rider, RiderParams, Sprocket, Wheel,
};
use tracing_subscriber::EnvFilter;
use uom::si::{
    f64::{Length, Mass, Time},
    length::meter,
    mass::kilogram,
    power::watt,
    time::{minute, second},
    velocity::kilometer_per_hour,
};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let wheel = Wheel::from_si(0.335, 0.1, 1.0);
    let bicycle = Bicycle {
        front_weight: Mass::new::<kilogram>(3.5),
        rear_weight: Mass::new::<kilogram>(4.5),
        front_wheel: wheel,
        rear_wheel: wheel,
        crank: Crank::new(0.1725, vec![34, 50]),
        sprocket: Sprocket::new(vec![11, 12, 13, 14, 15, 17, 19, 21, 23, 25, 28]),
    };
    let params = RiderParams::new(Length::new::<meter>(1.72), Mass::new::<kilogram>(62.0));
    let rider = Rider::new(params, bicycle, Level::new(5), CriticalPowerTable::default())?;

    // Approach, the climb in three ramps, and a short descent.
    let course = Course::from_meters([
        (2000.0, 10.0),
        (3000.0, 180.0),
        (2500.0, 225.0),
        (1500.0, 60.0),
        (1000.0, -40.0),
    ])?;
    println!(
        "course: {:.1} km with {:.0} m of climbing",
        course.distance().get::<meter>() / 1000.0,
        course.climbing().get::<meter>()
    );

    let ride = rider.time_for_course(&course, None)?;
    let pace = rider.natural_power(ride.elapsed);
    println!(
        "at natural pace: {:.1} min averaging {:.0} W over {} shifts",
        ride.elapsed.get::<minute>(),
        pace.get::<watt>(),
        ride.trace.len() - 1
    );
    if !ride.advice.is_empty() {
        println!("{}", ride.advice);
    }

    let target = Time::new::<minute>(35.0);
    let estimate = rider.power_for_duration(&course, target)?;
    let (low, high) = rider.classify_level(target, estimate.power);
    println!(
        "to finish in {:.0} min: {:.0} W ({low} to {high}), actual {:.0} s",
        target.get::<minute>(),
        estimate.power.get::<watt>(),
        estimate.ride.elapsed.get::<second>()
    );

    for grade in [0.0, 4.0, 8.0, 12.0] {
        let speed = rider.speed_for_grade(pace, grade)?;
        println!(
            "{grade:>4.0}% at {:.0} W: {:.1} km/h",
            pace.get::<watt>(),
            speed.get::<kilometer_per_hour>()
        );
    }

    Ok(())
}
