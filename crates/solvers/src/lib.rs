//! Fixed-iteration numerical solvers for ridetime.
//!
//! This crate is free of any cycling domain knowledge. It provides:
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`BisectionProblem`]: adapts a scalar solver variable to a model input and
//!   decides on which side of an evaluation the solution lies
//! - [`bisection`]: a bisection search that always runs a fixed number of halvings,
//!   reporting each evaluation to a [`bisection::Observer`] that may stop it early

mod model;
mod problem;

pub mod bisection;

pub use model::{Model, Snapshot};
pub use problem::{BisectionProblem, Direction};
