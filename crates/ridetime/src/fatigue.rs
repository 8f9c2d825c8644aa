//! Fitness levels and the fatigue collaborator.
//!
//! The simulation only needs two things from a fatigue model: a curve giving
//! the sustainable power per kilogram for a given effort duration at a fitness
//! level, and the inverse lookup that places an observed effort between two
//! levels. [`CriticalPowerTable`] is a critical-power implementation of both.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uom::si::{f64::Time, time::second};

use crate::error::ConfigurationError;

/// A fitness level. Higher levels sustain more power per kilogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Level(u8);

impl Level {
    #[must_use]
    pub const fn new(level: u8) -> Self {
        Self(level)
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Sustainable power per kilogram as a function of effort duration.
pub trait FatigueCurve {
    /// Returns the power per kilogram (W/kg) that can be held for `duration`.
    fn power_per_kg(&self, duration: Time) -> f64;
}

impl<F> FatigueCurve for F
where
    F: Fn(Time) -> f64,
{
    fn power_per_kg(&self, duration: Time) -> f64 {
        self(duration)
    }
}

/// Maps fitness levels to fatigue curves and observed efforts back to levels.
pub trait FatigueModel {
    type Curve: FatigueCurve;

    /// Returns the fatigue curve for `level`.
    fn curve(&self, level: Level) -> Self::Curve;

    /// Returns the pair of levels bracketing an effort of `power_per_kg` held
    /// for `duration`, lowest first.
    fn classify(&self, duration: Time, power_per_kg: f64) -> (Level, Level);
}

/// Critical power and anaerobic capacity of one level, both per kilogram.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CriticalPower {
    pub level: Level,
    /// Critical power in W/kg.
    pub cp: f64,
    /// Anaerobic work capacity (W') in J/kg.
    pub w_prime: f64,
}

impl CriticalPower {
    fn curve(&self) -> CriticalPowerCurve {
        CriticalPowerCurve {
            cp: self.cp,
            w_prime: self.w_prime,
        }
    }
}

/// The hyperbolic power-duration curve `cp + w' / t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalPowerCurve {
    cp: f64,
    w_prime: f64,
}

impl FatigueCurve for CriticalPowerCurve {
    fn power_per_kg(&self, duration: Time) -> f64 {
        let seconds = duration.get::<second>();
        if seconds <= 0.0 {
            return f64::INFINITY;
        }
        self.cp + self.w_prime / seconds
    }
}

/// A table of critical-power rows ordered by level.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<CriticalPower>", into = "Vec<CriticalPower>")
)]
pub struct CriticalPowerTable {
    rows: Vec<CriticalPower>,
}

impl CriticalPowerTable {
    /// Creates a table from rows ordered by ascending level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::FatigueTable`] if the table is empty,
    /// levels are not strictly ascending, a row has a non-positive critical
    /// power or negative W', or a higher level would sustain less power.
    pub fn new(rows: Vec<CriticalPower>) -> Result<Self, ConfigurationError> {
        let fail = |reason| Err(ConfigurationError::FatigueTable { reason });

        if rows.is_empty() {
            return fail("table has no rows");
        }
        if rows
            .iter()
            .any(|r| !(r.cp > 0.0 && r.cp.is_finite() && r.w_prime >= 0.0 && r.w_prime.is_finite()))
        {
            return fail("cp must be positive and w' non-negative");
        }
        for pair in rows.windows(2) {
            let [lower, upper] = pair else { continue };
            if lower.level >= upper.level {
                return fail("levels must be strictly ascending");
            }
            if lower.cp >= upper.cp || lower.w_prime > upper.w_prime {
                return fail("power must increase with level");
            }
        }

        Ok(Self { rows })
    }

    #[must_use]
    pub fn rows(&self) -> &[CriticalPower] {
        &self.rows
    }

    /// Returns the row for `level`, falling back to the closest lower level,
    /// or the lowest row if `level` is below the table.
    fn row(&self, level: Level) -> &CriticalPower {
        self.rows
            .iter()
            .take_while(|row| row.level <= level)
            .last()
            .unwrap_or(&self.rows[0])
    }
}

impl Default for CriticalPowerTable {
    /// Eight levels from 1.5 W/kg to 5.0 W/kg critical power.
    fn default() -> Self {
        let rows = (1..=8u8)
            .map(|n| CriticalPower {
                level: Level::new(n),
                cp: 1.0 + 0.5 * f64::from(n),
                w_prime: 100.0 + 20.0 * f64::from(n),
            })
            .collect();
        Self { rows }
    }
}

impl TryFrom<Vec<CriticalPower>> for CriticalPowerTable {
    type Error = ConfigurationError;

    fn try_from(rows: Vec<CriticalPower>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<CriticalPowerTable> for Vec<CriticalPower> {
    fn from(table: CriticalPowerTable) -> Self {
        table.rows
    }
}

impl FatigueModel for CriticalPowerTable {
    type Curve = CriticalPowerCurve;

    fn curve(&self, level: Level) -> Self::Curve {
        self.row(level).curve()
    }

    fn classify(&self, duration: Time, power_per_kg: f64) -> (Level, Level) {
        let sustainable = |row: &CriticalPower| row.curve().power_per_kg(duration);

        let first = &self.rows[0];
        let last = &self.rows[self.rows.len() - 1];

        let low = self
            .rows
            .iter()
            .rev()
            .find(|row| sustainable(row) <= power_per_kg)
            .unwrap_or(first);
        let high = self
            .rows
            .iter()
            .find(|row| sustainable(row) >= power_per_kg)
            .unwrap_or(last);

        (low.level, high.level)
    }
}
