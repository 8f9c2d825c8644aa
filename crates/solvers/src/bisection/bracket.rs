use thiserror::Error;

use crate::Direction;

/// Errors that can occur when creating a [`Bracket`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BracketError {
    /// One or both endpoints are non-finite.
    #[error("non-finite endpoint(s)")]
    NonFinite,
    /// Endpoints are equal, giving zero width.
    #[error("zero width")]
    ZeroWidth,
}

/// Ordered finite bounds of a bisection search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    left: f64,
    right: f64,
}

impl Bracket {
    /// Validates and orders the bracket endpoints.
    ///
    /// # Errors
    ///
    /// Returns `BracketError` if endpoints are non-finite or zero width.
    pub fn new(bracket: [f64; 2]) -> Result<Self, BracketError> {
        let [left, right] = bracket;

        if !left.is_finite() || !right.is_finite() {
            return Err(BracketError::NonFinite);
        }

        #[allow(clippy::float_cmp)]
        if left == right {
            return Err(BracketError::ZeroWidth);
        }

        if left < right {
            Ok(Self { left, right })
        } else {
            Ok(Self {
                left: right,
                right: left,
            })
        }
    }

    /// Returns the bracket bounds as an array.
    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }

    /// Returns the midpoint of the bracket.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.left + self.right)
    }

    /// Returns the bracket width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Moves one bound to `x`, keeping the half the direction points to.
    pub(super) fn shrink(&mut self, x: f64, direction: Direction) {
        match direction {
            Direction::Up => self.left = x,
            Direction::Down => self.right = x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn reorders_reversed_endpoints() {
        let bracket = Bracket::new([3.0, 1.0]).expect("valid bracket");
        assert_eq!(bracket.as_array(), [1.0, 3.0]);
        assert_relative_eq!(bracket.midpoint(), 2.0);
        assert_relative_eq!(bracket.width(), 2.0);
    }

    #[test]
    fn rejects_non_finite() {
        assert!(matches!(
            Bracket::new([f64::NAN, 1.0]),
            Err(BracketError::NonFinite)
        ));
        assert!(matches!(
            Bracket::new([0.0, f64::INFINITY]),
            Err(BracketError::NonFinite)
        ));
    }

    #[test]
    fn rejects_zero_width() {
        assert!(matches!(
            Bracket::new([2.0, 2.0]),
            Err(BracketError::ZeroWidth)
        ));
    }

    #[test]
    fn shrink_moves_the_matching_bound() {
        let mut bracket = Bracket::new([0.0, 2.0]).expect("valid bracket");

        bracket.shrink(1.0, Direction::Up);
        assert_eq!(bracket.as_array(), [1.0, 2.0]);

        bracket.shrink(1.5, Direction::Down);
        assert_eq!(bracket.as_array(), [1.0, 1.5]);
    }
}
