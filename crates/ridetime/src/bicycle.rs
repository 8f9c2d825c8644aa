//! Bicycle parameter records.
//!
//! These are plain values with public fields. Each record has a `validate`
//! method, and [`Rider::new`](crate::Rider::new) validates the whole bicycle
//! before any simulation can run.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{Length, Mass, MomentOfInertia},
    length::meter,
    mass::kilogram,
    moment_of_inertia::kilogram_square_meter,
};

use crate::error::{
    ConfigurationError, ensure_ascending_teeth, ensure_non_negative, ensure_positive,
};

/// A wheel: radius, rotational inertia, and its own weight.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Wheel {
    pub radius: Length,
    pub inertia: MomentOfInertia,
    pub weight: Mass,
}

impl Wheel {
    /// Creates a wheel from SI values (m, kg·m², kg).
    #[must_use]
    pub fn from_si(radius: f64, inertia: f64, weight: f64) -> Self {
        Self {
            radius: Length::new::<meter>(radius),
            inertia: MomentOfInertia::new::<kilogram_square_meter>(inertia),
            weight: Mass::new::<kilogram>(weight),
        }
    }

    /// Checks that the radius is positive and the inertia and weight are not negative.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ensure_positive(self.radius.get::<meter>(), "wheel radius")?;
        ensure_non_negative(
            self.inertia.get::<kilogram_square_meter>(),
            "wheel inertia",
        )?;
        ensure_non_negative(self.weight.get::<kilogram>(), "wheel weight")
    }
}

/// Crank arm length and chainring tooth counts.
///
/// Chainrings are ordered by ascending tooth count: index 0 is the inner
/// (smaller) ring and index 1 the outer ring.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Crank {
    pub length: Length,
    pub chainrings: Vec<u32>,
}

impl Crank {
    /// Creates a crank with an arm length in meters.
    #[must_use]
    pub fn new(length: f64, chainrings: Vec<u32>) -> Self {
        Self {
            length: Length::new::<meter>(length),
            chainrings,
        }
    }

    /// Checks the arm length and the chainring layout.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] unless there are exactly two strictly
    /// ascending chainrings and the arm length is positive.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ensure_positive(self.length.get::<meter>(), "crank length")?;
        if self.chainrings.len() != 2 {
            return Err(ConfigurationError::ChainringCount {
                count: self.chainrings.len(),
            });
        }
        ensure_ascending_teeth(&self.chainrings, "chainring")
    }
}

/// Rear cog tooth counts.
///
/// Cogs are ordered by ascending tooth count: index 0 is the smallest cog
/// (hardest gear) and the last index the largest cog (easiest gear).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sprocket {
    pub cogs: Vec<u32>,
}

impl Sprocket {
    #[must_use]
    pub fn new(cogs: Vec<u32>) -> Self {
        Self { cogs }
    }

    /// Checks that there are at least two strictly ascending cogs.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the cog list is too short or unsorted.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.cogs.len() < 2 {
            return Err(ConfigurationError::CogCount {
                count: self.cogs.len(),
            });
        }
        ensure_ascending_teeth(&self.cogs, "sprocket")
    }
}

/// A complete bicycle.
///
/// `front_weight` and `rear_weight` are the frame weight carried by each
/// axle, wheels included.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bicycle {
    pub front_weight: Mass,
    pub rear_weight: Mass,
    pub front_wheel: Wheel,
    pub rear_wheel: Wheel,
    pub crank: Crank,
    pub sprocket: Sprocket,
}

impl Bicycle {
    /// Validates every component.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ensure_non_negative(self.front_weight.get::<kilogram>(), "bicycle front weight")?;
        ensure_non_negative(self.rear_weight.get::<kilogram>(), "bicycle rear weight")?;
        self.front_wheel.validate()?;
        self.rear_wheel.validate()?;
        self.crank.validate()?;
        self.sprocket.validate()
    }
}
