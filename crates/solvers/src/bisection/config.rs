use thiserror::Error;

/// Errors returned when a [`Config`] is not usable.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// At least one halving is needed to produce an estimate.
    #[error("max_iters must be at least 1")]
    ZeroIterations,
}

/// Configuration for the bisection solver.
///
/// The solver always runs exactly `max_iters` halvings. There is no tolerance
/// check, so the residual bracket width is `(right - left) / 2^max_iters`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub max_iters: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_iters: 100 }
    }
}

impl Config {
    /// Creates a config that runs `max_iters` halvings.
    #[must_use]
    pub fn with_iters(max_iters: usize) -> Self {
        Self { max_iters }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroIterations`] if `max_iters` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iters == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        Ok(())
    }
}
