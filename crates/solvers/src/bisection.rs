//! Fixed-iteration bisection.
//!
//! Each iteration evaluates the bracket midpoint, asks the problem which half
//! holds the solution, and keeps that half:
//!
//! ```text
//! x = (left + right) / 2
//! Up   => left  = x
//! Down => right = x
//! ```
//!
//! The solver never checks a tolerance. It performs exactly
//! [`Config::max_iters`] halvings and reports the last evaluated midpoint,
//! which keeps results deterministic for a given bracket and iteration count.

mod bracket;
mod config;
mod error;
mod event;
mod solution;

pub use bracket::{Bracket, BracketError};
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::{Action, Event, Observer};
pub use solution::{Solution, Status};

use crate::{BisectionProblem, Model, Snapshot};

/// Runs a fixed number of bisection iterations over `bracket`.
///
/// # Observer
///
/// The observer receives an [`Event`] after every evaluation and may return
/// [`Action::StopEarly`] to end the search with that evaluation.
///
/// # Errors
///
/// Returns an error if the bracket or config is invalid, or if the model or
/// problem fails during an evaluation.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: BisectionProblem<Input = M::Input, Output = M::Output>,
    Obs: Observer<M::Input, M::Output>,
{
    config.validate()?;
    let mut bracket = Bracket::new(bracket)?;

    let mut last = None;

    for iter in 1..=config.max_iters {
        let x = bracket.midpoint();

        let input = problem.input(x).map_err(Error::problem)?;
        let output = model.call(&input).map_err(Error::model)?;
        let direction = problem
            .direction(&input, &output)
            .map_err(Error::problem)?;
        let snapshot = Snapshot::new(input, output);

        let event = Event {
            iter,
            bracket: bracket.as_array(),
            x,
            direction,
            snapshot: &snapshot,
        };
        let action = observer.observe(&event);

        bracket.shrink(x, direction);

        if let Some(Action::StopEarly) = action {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                x,
                snapshot,
                bracket: bracket.as_array(),
                iters: iter,
            });
        }

        last = Some((x, snapshot));
    }

    let Some((x, snapshot)) = last else {
        return Err(ConfigError::ZeroIterations.into());
    };

    Ok(Solution {
        status: Status::Complete,
        x,
        snapshot,
        bracket: bracket.as_array(),
        iters: config.max_iters,
    })
}

/// Runs bisection without observation.
///
/// # Errors
///
/// Returns an error if the bracket or config is invalid, or if the model or
/// problem fails during an evaluation.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: BisectionProblem<Input = M::Input, Output = M::Output>,
{
    solve(model, problem, bracket, config, ())
}
