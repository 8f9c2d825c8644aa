use uom::si::{
    f64::{Mass, MomentOfInertia},
    mass::kilogram,
    moment_of_inertia::kilogram_square_meter,
};

use crate::{Bicycle, RiderParams};

/// Share of the rider's weight carried by the front axle.
const FRONT_SHARE: f64 = 0.4;

/// Effective mass and rotational inertia of rider plus bicycle.
///
/// `total_mass` adds the frame weights as given, wheels included, while the
/// axle loads subtract each wheel's own weight. Dynamics only reads
/// `total_mass`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassModel {
    pub(crate) total_mass: f64,
    pub(crate) total_inertia: f64,
    front_axle_load: f64,
    rear_axle_load: f64,
}

impl MassModel {
    #[must_use]
    pub fn new(params: &RiderParams, bicycle: &Bicycle) -> Self {
        let rider = params.weight.get::<kilogram>();
        let front = bicycle.front_weight.get::<kilogram>();
        let rear = bicycle.rear_weight.get::<kilogram>();

        Self {
            total_mass: rider + front + rear,
            total_inertia: bicycle.front_wheel.inertia.get::<kilogram_square_meter>()
                + bicycle.rear_wheel.inertia.get::<kilogram_square_meter>(),
            front_axle_load: rider * FRONT_SHARE + front
                - bicycle.front_wheel.weight.get::<kilogram>(),
            rear_axle_load: rider * (1.0 - FRONT_SHARE) + rear
                - bicycle.rear_wheel.weight.get::<kilogram>(),
        }
    }

    #[must_use]
    pub fn total_mass(&self) -> Mass {
        Mass::new::<kilogram>(self.total_mass)
    }

    #[must_use]
    pub fn total_inertia(&self) -> MomentOfInertia {
        MomentOfInertia::new::<kilogram_square_meter>(self.total_inertia)
    }

    /// Sprung load on the front axle, excluding the front wheel.
    #[must_use]
    pub fn front_axle_load(&self) -> Mass {
        Mass::new::<kilogram>(self.front_axle_load)
    }

    /// Sprung load on the rear axle, excluding the rear wheel.
    #[must_use]
    pub fn rear_axle_load(&self) -> Mass {
        Mass::new::<kilogram>(self.rear_axle_load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::test_utils;

    #[test]
    fn total_mass_keeps_wheel_weights() {
        let mass = MassModel::new(&test_utils::rider_params(), &test_utils::road_bike());

        // 70 kg rider + 4 kg front + 5 kg rear.
        assert_relative_eq!(mass.total_mass().get::<kilogram>(), 79.0);
        assert_relative_eq!(
            mass.total_inertia().get::<kilogram_square_meter>(),
            0.2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn axle_loads_drop_wheel_weights() {
        let mass = MassModel::new(&test_utils::rider_params(), &test_utils::road_bike());

        // 0.4 * 70 + 4 - 1 and 0.6 * 70 + 5 - 1.
        assert_relative_eq!(mass.front_axle_load().get::<kilogram>(), 31.0, epsilon = 1e-12);
        assert_relative_eq!(mass.rear_axle_load().get::<kilogram>(), 46.0, epsilon = 1e-12);

        let axles = mass.front_axle_load() + mass.rear_axle_load();
        assert!(axles < mass.total_mass());
    }
}
