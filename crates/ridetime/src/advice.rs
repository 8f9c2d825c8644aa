//! Gearing recommendations derived from a [`GearReport`].

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Crank, GearReport, Sprocket, gearing::Gearing};

/// The easiest gear was too hard; either change would restore cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LowGearAdvice {
    /// Suggested inner chainring tooth count.
    pub inner_chainring: u32,
    /// Suggested largest cog tooth count.
    pub largest_cog: u32,
}

/// The hardest gear was too easy; either change would restore cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TopGearAdvice {
    /// Suggested outer chainring tooth count.
    pub outer_chainring: u32,
    /// Suggested smallest cog tooth count.
    pub smallest_cog: u32,
}

/// Gearing recommendations for a ride.
///
/// `Display` writes one line per recommendation, or nothing if the gearing
/// was sufficient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Advice {
    pub low_gear: Option<LowGearAdvice>,
    pub top_gear: Option<TopGearAdvice>,
}

impl Advice {
    /// Builds recommendations from a report and the drivetrain it was
    /// recorded on.
    ///
    /// The crank and sprocket are expected to be valid.
    #[must_use]
    pub fn from_report(report: &GearReport, crank: &Crank, sprocket: &Sprocket) -> Self {
        let (Some(&inner), Some(&outer)) = (crank.chainrings.first(), crank.chainrings.last())
        else {
            return Self::default();
        };
        let (Some(&smallest), Some(&largest)) = (sprocket.cogs.first(), sprocket.cogs.last())
        else {
            return Self::default();
        };

        Self::from_teeth(report, [inner, outer], [smallest, largest])
    }

    pub(crate) fn for_gearing(report: &GearReport, gearing: &Gearing) -> Self {
        let smallest = gearing.cogs[0];
        let largest = gearing.cogs[gearing.cogs.len() - 1];
        Self::from_teeth(report, gearing.chainrings, [smallest, largest])
    }

    #[allow(
        clippy::float_cmp,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn from_teeth(
        report: &GearReport,
        [inner, outer]: [u32; 2],
        [smallest, largest]: [u32; 2],
    ) -> Self {
        let low_gear = (report.lowgear != 1.0).then(|| {
            let ratio = report.lowgear;
            LowGearAdvice {
                inner_chainring: (f64::from(inner) / ratio).floor() as u32,
                largest_cog: (f64::from(largest) * ratio).floor() as u32 + 1,
            }
        });

        let top_gear = (report.topgear != 1.0).then(|| {
            let ratio = report.topgear;
            TopGearAdvice {
                outer_chainring: (f64::from(outer) / ratio).floor() as u32 + 1,
                smallest_cog: (f64::from(smallest) * ratio).floor() as u32,
            }
        });

        Self { low_gear, top_gear }
    }

    /// Returns `true` if there is nothing to recommend.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.low_gear.is_none() && self.top_gear.is_none()
    }
}

impl fmt::Display for LowGearAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "low gear too hard: use a {}-tooth inner chainring or a {}-tooth largest cog",
            self.inner_chainring, self.largest_cog
        )
    }
}

impl fmt::Display for TopGearAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "top gear too easy: use a {}-tooth outer chainring or a {}-tooth smallest cog",
            self.outer_chainring, self.smallest_cog
        )
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.low_gear, &self.top_gear) {
            (Some(low), Some(top)) => write!(f, "{low}\n{top}"),
            (Some(low), None) => write!(f, "{low}"),
            (None, Some(top)) => write!(f, "{top}"),
            (None, None) => Ok(()),
        }
    }
}
