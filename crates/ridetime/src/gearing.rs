//! Gear selection with shift hysteresis.
//!
//! Every integration tick the controller looks at the current velocity, works
//! out which rear cog would keep the rider at their cadence on the engaged
//! chainring, and moves toward it. Front shifts and rear shifts have separate
//! lockouts, and the rear moves one cog at a time.
//!
//! While riding it also records how far the gearing falls short at either
//! extreme, which [`Advice`](crate::Advice) turns into recommendations.

use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;
use uom::si::{angular_velocity::revolution_per_minute, f64::Time, length::meter, time::second};

use crate::{Bicycle, RiderParams};

const INNER: usize = 0;
const OUTER: usize = 1;

/// A front/rear gear combination, as chainring and cog indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gear {
    pub front: usize,
    pub rear: usize,
}

impl Gear {
    #[must_use]
    pub const fn new(front: usize, rear: usize) -> Self {
        Self { front, rear }
    }
}

/// A gear engaged at a point in the ride.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shift {
    pub time: Time,
    pub gear: Gear,
}

/// How far the gearing fell short at its extremes during a ride.
///
/// Both values are speed-to-cadence ratios and start at `1.0`.
/// `lowgear > 1` means the easiest gear was still too hard; `topgear < 1`
/// means the hardest gear was still too easy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GearReport {
    pub lowgear: f64,
    pub topgear: f64,
}

impl GearReport {
    /// Returns `true` if neither extreme was ever short.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_sufficient(&self) -> bool {
        self.lowgear == 1.0 && self.topgear == 1.0
    }
}

impl Default for GearReport {
    fn default() -> Self {
        Self {
            lowgear: 1.0,
            topgear: 1.0,
        }
    }
}

/// Drivetrain geometry as the controller sees it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Gearing {
    pub(crate) chainrings: [u32; 2],
    pub(crate) cogs: Vec<u32>,
    /// Distance the rear wheel covers per second for one revolution of the
    /// wheel per crank revolution at cadence (m/s).
    pub(crate) rollout: f64,
}

impl Gearing {
    /// Builds the gearing for a validated bicycle.
    ///
    /// Assumes the crank has two chainrings; callers validate first.
    pub(crate) fn new(params: &RiderParams, bicycle: &Bicycle) -> Self {
        let rings = &bicycle.crank.chainrings;
        let radius = bicycle.rear_wheel.radius.get::<meter>();
        let cadence = params.cadence.get::<revolution_per_minute>();

        Self {
            chainrings: [rings[INNER], rings[OUTER]],
            cogs: bicycle.sprocket.cogs.clone(),
            rollout: 2.0 * PI * radius * cadence / 60.0,
        }
    }

    fn last_cog(&self) -> usize {
        self.cogs.len() - 1
    }

    /// Speed-to-cadence ratio in `gear` at `velocity`.
    fn ratio(&self, gear: Gear, velocity: f64) -> f64 {
        let teeth = f64::from(self.chainrings[gear.front]) / f64::from(self.cogs[gear.rear]);
        velocity / (self.rollout * teeth)
    }

    /// Returns the cog that best matches `ideal` on chainring `front`.
    ///
    /// Binary search for the last cog whose ratio still reaches `ideal`, then
    /// step to the next larger cog if its `cog / ring` score is strictly
    /// closer to `ideal`. The score is the reciprocal of the gear ratio, so
    /// the step is taken on almost every call and the smallest cog is only
    /// kept when it is also the largest.
    pub(crate) fn rear_for(&self, front: usize, ideal: f64) -> usize {
        let ring = f64::from(self.chainrings[front]);
        let len = self.cogs.len();

        let (mut lb, mut ub) = (0, len);
        while lb + 1 < ub {
            let mid = (lb + ub) / 2;
            if ideal * f64::from(self.cogs[mid]) > ring {
                ub = mid;
            } else {
                lb = mid;
            }
        }

        if lb + 1 < len {
            let here = (ideal - f64::from(self.cogs[lb]) / ring).abs();
            let next = (ideal - f64::from(self.cogs[lb + 1]) / ring).abs();
            if next < here {
                lb += 1;
            }
        }

        lb
    }
}

/// Mutable controller state for one integration run.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GearState {
    gear: Gear,
    front_lock: f64,
    rear_lock: f64,
    front_lockout: f64,
    rear_lockout: f64,
    report: GearReport,
}

impl GearState {
    /// Starts on the outer chainring and the middle cog with both lockouts open.
    pub(crate) fn new(gearing: &Gearing, front_lockout: Time, rear_lockout: Time) -> Self {
        Self {
            gear: Gear::new(OUTER, gearing.cogs.len() / 2),
            front_lock: 0.0,
            rear_lock: 0.0,
            front_lockout: front_lockout.get::<second>(),
            rear_lockout: rear_lockout.get::<second>(),
            report: GearReport::default(),
        }
    }

    pub(crate) fn gear(&self) -> Gear {
        self.gear
    }

    pub(crate) fn report(&self) -> GearReport {
        self.report
    }

    /// Updates the engaged gear for `velocity` at `time`.
    ///
    /// Returns the new gear if a front or rear shift happened.
    pub(crate) fn select(&mut self, gearing: &Gearing, velocity: f64, time: f64) -> Option<Gear> {
        let ideal = velocity / gearing.rollout;
        let len = gearing.cogs.len();
        let mut shifted = false;

        let rear = gearing.rear_for(self.gear.front, ideal);
        let front = match self.gear.front {
            INNER if rear * 4 < len => OUTER,
            OUTER if rear * 4 > len * 3 => INNER,
            current => current,
        };

        if front != self.gear.front && time > self.front_lock {
            self.gear.front = front;
            self.front_lock = time + self.front_lockout;
            shifted = true;
        }

        // Recomputed for whichever ring is engaged now, even if the front
        // shift was held back.
        let rear = gearing.rear_for(self.gear.front, ideal);
        if rear != self.gear.rear && time > self.rear_lock {
            if rear > self.gear.rear {
                self.gear.rear += 1;
            } else {
                self.gear.rear -= 1;
            }
            self.rear_lock = time + self.rear_lockout;
            shifted = true;
        }

        self.track_deficiency(gearing, velocity);

        if shifted {
            trace!(time, front = self.gear.front, rear = self.gear.rear, "shift");
            Some(self.gear)
        } else {
            None
        }
    }

    fn track_deficiency(&mut self, gearing: &Gearing, velocity: f64) {
        let ratio = gearing.ratio(self.gear, velocity);

        if self.gear == Gear::new(INNER, gearing.last_cog()) && ratio > 1.0 {
            self.report.lowgear = self.report.lowgear.max(ratio);
        }
        if self.gear == Gear::new(OUTER, 0) && ratio < 1.0 {
            self.report.topgear = self.report.topgear.min(ratio);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::test_utils;

    fn gearing() -> Gearing {
        Gearing::new(&test_utils::rider_params(), &test_utils::road_bike())
    }

    fn state_at(gear: Gear, front_lock: f64, rear_lock: f64) -> GearState {
        GearState {
            gear,
            front_lock,
            rear_lock,
            front_lockout: 10.0,
            rear_lockout: 1.0,
            report: GearReport::default(),
        }
    }

    fn seconds(s: f64) -> Time {
        Time::new::<second>(s)
    }

    #[test]
    fn rollout_at_ninety_rpm() {
        assert_relative_eq!(gearing().rollout, 2.0 * PI * 0.335 * 1.5, epsilon = 1e-12);
    }

    mod rear_search {
        use super::*;

        #[test]
        fn tie_break_scores_cog_over_ring() {
            // Search stops at 28; 32/34 = 0.941 is closer to 1.1 than 28/34.
            assert_eq!(gearing().rear_for(INNER, 1.1), 10);
        }

        #[test]
        fn tie_break_steps_past_closer_gear_ratio() {
            // 50/21 = 2.381 is the closer gear ratio, but 24/50 scores closer
            // than 21/50.
            assert_eq!(gearing().rear_for(OUTER, 2.35), 8);
            // 34/28 = 1.214 is closer to 1.18 than 34/32, yet 32 wins.
            assert_eq!(gearing().rear_for(INNER, 1.18), 10);
        }

        #[test]
        fn lands_one_cog_above_search() {
            // Search stops at 17 (50/17 = 2.94); 19/50 scores closer to 2.9.
            assert_eq!(gearing().rear_for(OUTER, 2.9), 6);
        }

        #[test]
        fn saturates_at_both_ends() {
            let gearing = gearing();
            // The search bottoms out at 11, then steps to 12.
            assert_eq!(gearing.rear_for(OUTER, 20.0), 1);
            assert_eq!(gearing.rear_for(INNER, 0.0), 10);
            assert_eq!(gearing.rear_for(OUTER, 0.0), 10);
        }
    }

    #[test]
    fn starts_outer_middle() {
        let state = GearState::new(&gearing(), seconds(10.0), seconds(1.0));
        assert_eq!(state.gear(), Gear::new(1, 5));
        assert!(state.report().is_sufficient());
    }

    #[test]
    fn standing_start_drops_to_inner_ring() {
        let gearing = gearing();
        let mut state = GearState::new(&gearing, seconds(10.0), seconds(1.0));

        assert_eq!(state.select(&gearing, 0.0, 0.1), Some(Gear::new(0, 6)));

        // Both axles locked now.
        assert_eq!(state.select(&gearing, 0.0, 0.2), None);
        assert_eq!(state.select(&gearing, 0.0, 1.1), None);

        // Rear lock lifts first, one cog per shift.
        assert_eq!(state.select(&gearing, 0.0, 1.2), Some(Gear::new(0, 7)));
        assert_eq!(state.select(&gearing, 0.0, 2.3), Some(Gear::new(0, 8)));
    }

    #[test]
    fn held_front_shift_recomputes_rear_for_engaged_ring() {
        let gearing = gearing();
        let mut state = state_at(Gear::new(OUTER, 9), 10.0, 0.0);

        // Wants the inner ring, but the front is locked until t = 10.
        let shift = state.select(&gearing, 0.0, 5.0);
        assert_eq!(shift, Some(Gear::new(OUTER, 10)));
    }

    #[test]
    fn front_and_rear_can_shift_together() {
        let gearing = gearing();
        let mut state = state_at(Gear::new(INNER, 2), 0.0, 0.0);

        // Fast enough that both rings want the second smallest cog.
        let velocity = 4.5 * gearing.rollout;
        let shift = state.select(&gearing, velocity, 3.0);
        assert_eq!(shift, Some(Gear::new(OUTER, 1)));
        assert_relative_eq!(state.front_lock, 13.0);
        assert_relative_eq!(state.rear_lock, 4.0);
    }

    #[test]
    fn lowgear_deficiency_only_grows() {
        let gearing = gearing();
        let mut state = state_at(Gear::new(INNER, 10), 100.0, 100.0);
        let easiest = gearing.rollout * 34.0 / 32.0;

        state.select(&gearing, 1.2 * easiest, 1.0);
        assert_relative_eq!(state.report().lowgear, 1.2, epsilon = 1e-12);

        state.select(&gearing, 1.1 * easiest, 2.0);
        assert_relative_eq!(state.report().lowgear, 1.2, epsilon = 1e-12);

        state.select(&gearing, 0.9 * easiest, 3.0);
        assert_relative_eq!(state.report().lowgear, 1.2, epsilon = 1e-12);
        assert_relative_eq!(state.report().topgear, 1.0);
    }

    #[test]
    fn topgear_deficiency_only_shrinks() {
        let gearing = gearing();
        let mut state = state_at(Gear::new(OUTER, 0), 100.0, 100.0);
        let hardest = gearing.rollout * 50.0 / 11.0;

        state.select(&gearing, 0.8 * hardest, 1.0);
        state.select(&gearing, 0.9 * hardest, 2.0);
        state.select(&gearing, 1.3 * hardest, 3.0);

        assert_relative_eq!(state.report().topgear, 0.8, epsilon = 1e-12);
        assert_relative_eq!(state.report().lowgear, 1.0);
    }

    #[test]
    fn easiest_gear_holds_and_records_shortfall() {
        let gearing = gearing();
        let mut state = state_at(Gear::new(INNER, 10), 0.0, 0.0);

        // 34/28 is the closer gear ratio to 1.18, but the search keeps 32.
        let shift = state.select(&gearing, 1.18 * gearing.rollout, 1.0);
        assert_eq!(shift, None);
        assert_eq!(state.gear(), Gear::new(INNER, 10));
        assert_relative_eq!(state.report().lowgear, 1.18 * 32.0 / 34.0, epsilon = 1e-12);
    }

    #[test]
    fn no_deficiency_away_from_extremes() {
        let gearing = gearing();
        let mut state = state_at(Gear::new(INNER, 9), 100.0, 100.0);

        state.select(&gearing, 10.0 * gearing.rollout, 1.0);
        assert!(state.report().is_sufficient());
    }
}
