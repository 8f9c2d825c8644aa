//! Courses as ordered segments of distance and elevation change.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uom::si::{f64::Length, length::meter};

use crate::error::ConfigurationError;

/// A stretch of road with a constant grade.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CourseSegment {
    /// Distance travelled along the road.
    pub distance: Length,
    /// Elevation gained over the segment, negative for a descent.
    pub elevation: Length,
}

impl CourseSegment {
    /// Creates a segment from a distance and elevation change in meters.
    #[must_use]
    pub fn new(distance: f64, elevation: f64) -> Self {
        Self {
            distance: Length::new::<meter>(distance),
            elevation: Length::new::<meter>(elevation),
        }
    }

    /// Grade in percent: elevation change per distance, times 100.
    #[must_use]
    pub fn grade_percent(&self) -> f64 {
        self.elevation.get::<meter>() * 100.0 / self.distance.get::<meter>()
    }
}

/// A non-empty sequence of segments ridden in order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<CourseSegment>", into = "Vec<CourseSegment>")
)]
pub struct Course {
    segments: Vec<CourseSegment>,
}

impl Course {
    /// Creates a course from its segments.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if there are no segments, or if any
    /// segment's distance is not positive and finite, or its elevation change
    /// is not finite.
    pub fn new(segments: Vec<CourseSegment>) -> Result<Self, ConfigurationError> {
        if segments.is_empty() {
            return Err(ConfigurationError::EmptyCourse);
        }

        for (index, segment) in segments.iter().enumerate() {
            let distance = segment.distance.get::<meter>();
            let elevation = segment.elevation.get::<meter>();
            if !(distance > 0.0 && distance.is_finite() && elevation.is_finite()) {
                return Err(ConfigurationError::SegmentDistance { index });
            }
        }

        Ok(Self { segments })
    }

    /// Creates a course from `(distance, elevation change)` pairs in meters.
    ///
    /// # Errors
    ///
    /// See [`Course::new`].
    pub fn from_meters<I>(pairs: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(distance, elevation)| CourseSegment::new(distance, elevation))
                .collect(),
        )
    }

    #[must_use]
    pub fn segments(&self) -> &[CourseSegment] {
        &self.segments
    }

    /// Total distance along the road.
    #[must_use]
    pub fn distance(&self) -> Length {
        self.segments.iter().map(|s| s.distance).sum()
    }

    /// Sum of all positive elevation changes.
    #[must_use]
    pub fn climbing(&self) -> Length {
        self.segments
            .iter()
            .map(|s| s.elevation)
            .filter(|e| e.get::<meter>() > 0.0)
            .sum()
    }
}

impl TryFrom<Vec<CourseSegment>> for Course {
    type Error = ConfigurationError;

    fn try_from(segments: Vec<CourseSegment>) -> Result<Self, Self::Error> {
        Self::new(segments)
    }
}

impl From<Course> for Vec<CourseSegment> {
    fn from(course: Course) -> Self {
        course.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn grade_is_percent() {
        assert_relative_eq!(CourseSegment::new(1000.0, 50.0).grade_percent(), 5.0);
        assert_relative_eq!(CourseSegment::new(200.0, -30.0).grade_percent(), -15.0);
    }

    #[test]
    fn totals() {
        let course =
            Course::from_meters([(1000.0, 50.0), (500.0, -20.0), (250.0, 10.0)]).unwrap();

        assert_eq!(course.segments().len(), 3);
        assert_relative_eq!(course.distance().get::<meter>(), 1750.0);
        assert_relative_eq!(course.climbing().get::<meter>(), 60.0);
    }

    #[test]
    fn rejects_empty_course() {
        assert_eq!(Course::new(vec![]), Err(ConfigurationError::EmptyCourse));
    }

    #[test]
    fn rejects_bad_segments() {
        assert_eq!(
            Course::from_meters([(100.0, 0.0), (0.0, 0.0)]),
            Err(ConfigurationError::SegmentDistance { index: 1 })
        );
        assert_eq!(
            Course::from_meters([(-5.0, 0.0)]),
            Err(ConfigurationError::SegmentDistance { index: 0 })
        );
        assert!(Course::from_meters([(f64::INFINITY, 0.0)]).is_err());
        assert!(Course::from_meters([(f64::NAN, 0.0)]).is_err());
        assert!(Course::from_meters([(10.0, f64::NAN)]).is_err());
    }
}
