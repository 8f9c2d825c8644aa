use crate::Snapshot;

/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Ran all configured iterations.
    Complete,
    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a bisection solve.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    /// Final solver status.
    pub status: Status,
    /// The last evaluated midpoint.
    pub x: f64,
    /// Snapshot of the model call at `x`.
    pub snapshot: Snapshot<I, O>,
    /// Bracket remaining after the last halving.
    pub bracket: [f64; 2],
    /// Number of iterations performed.
    pub iters: usize,
}
