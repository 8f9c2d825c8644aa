use crate::{Direction, Snapshot};

/// Control actions supported by the bisection solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver and return the current evaluation as the solution.
    StopEarly,
}

/// Iteration event emitted by the bisection solver.
#[derive(Debug)]
pub struct Event<'a, I, O> {
    /// Iteration counter (1-based).
    pub iter: usize,
    /// Search bracket before this iteration's halving.
    pub bracket: [f64; 2],
    /// The evaluated midpoint.
    pub x: f64,
    /// Side of `x` on which the solution lies.
    pub direction: Direction,
    /// Model input and output at `x`.
    pub snapshot: &'a Snapshot<I, O>,
}

/// Hook the solver calls once per evaluation, after the direction is known.
///
/// Returning `Some(Action::StopEarly)` ends the search at that evaluation.
/// Any closure over an [`Event`] is an observer; `()` never intervenes.
pub trait Observer<I, O> {
    fn observe(&mut self, event: &Event<'_, I, O>) -> Option<Action>;
}

impl<I, O, F> Observer<I, O> for F
where
    F: FnMut(&Event<'_, I, O>) -> Option<Action>,
{
    fn observe(&mut self, event: &Event<'_, I, O>) -> Option<Action> {
        self(event)
    }
}

impl<I, O> Observer<I, O> for () {
    fn observe(&mut self, _event: &Event<'_, I, O>) -> Option<Action> {
        None
    }
}
