/// The side of an evaluated point on which the solution lies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The solution lies above the evaluated point; the lower bound moves up.
    Up,
    /// The solution lies at or below the evaluated point; the upper bound moves down.
    Down,
}

/// Defines a one-dimensional search to be solved by bisection.
///
/// The problem maps the scalar solver variable into a model input and, after
/// the model has been called, reports which half of the bracket to keep.
pub trait BisectionProblem {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Maps the solver variable `x` into a model input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be constructed from `x`.
    fn input(&self, x: f64) -> Result<Self::Input, Self::Error>;

    /// Decides on which side of the evaluated point the solution lies.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction cannot be determined.
    fn direction(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<Direction, Self::Error>;
}
