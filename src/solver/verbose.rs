//! The verbose solver: the same search loop with per-step progress
//! notifications and an optional pacing delay, for demos and debugging.

use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    solver::{
        cancellation::CancellationToken,
        csp::{Assignment, BinaryCsp},
        engine::{Solver, SolverState},
        solution::SolveResult,
        strategies::CheckingStrategy,
    },
};

/// A snapshot of the search delivered to observers after each step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveProgress<V> {
    pub state: SolverState,
    /// The search cursor's level after the step.
    pub level: isize,
    /// The assignment held at the cursor, when there is one.
    pub last_assignment: Option<Assignment<V>>,
}

impl<V> SolveProgress<V> {
    pub(crate) fn capture<C: BinaryCsp<Value = V>>(
        state: SolverState,
        checking: &dyn CheckingStrategy<C>,
        csp: &C,
    ) -> Self {
        Self {
            state,
            level: checking.search_level(),
            last_assignment: checking.present_assignment(csp),
        }
    }
}

/// Receives one notification per search step.
///
/// Observers may hold a clone of the solve's [`CancellationToken`] and
/// cancel mid-search; the solver notices on the next iteration.
pub trait ProgressObserver<V> {
    fn on_step(&mut self, progress: &SolveProgress<V>);
}

impl<V, F: FnMut(&SolveProgress<V>)> ProgressObserver<V> for F {
    fn on_step(&mut self, progress: &SolveProgress<V>) {
        self(progress)
    }
}

/// Wraps a [`Solver`] with observer notifications and an optional delay
/// between steps.
pub struct VerboseSolver<C: BinaryCsp> {
    inner: Solver<C>,
    observers: Vec<Box<dyn ProgressObserver<C::Value>>>,
    step_delay: Option<Duration>,
}

impl<C: BinaryCsp> VerboseSolver<C> {
    pub(crate) fn new(inner: Solver<C>, step_delay: Option<Duration>) -> Self {
        Self {
            inner,
            observers: Vec::new(),
            step_delay,
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn ProgressObserver<C::Value>>) {
        self.observers.push(observer);
    }

    /// Runs the search, notifying every observer after each step. Shares
    /// the silent solver's cancellation and reentrancy behaviour.
    pub fn solve(&mut self, csp: &C, token: &CancellationToken) -> Result<SolveResult<C::Value>> {
        let Self {
            inner,
            observers,
            step_delay,
        } = self;
        inner.solve_with(csp, token, &mut |progress| {
            for observer in observers.iter_mut() {
                observer.on_step(progress);
            }
            if let Some(delay) = step_delay {
                thread::sleep(*delay);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::error::SolverError;
    use crate::problems::map_colouring::{Colour, MapColouringProblem};
    use crate::solver::engine::SolverBuilder;
    use crate::solver::strategies::CheckingStrategySelector;

    fn three_colour_triangle() -> MapColouringProblem {
        MapColouringProblem::new(
            3,
            vec![Colour::Red, Colour::Green, Colour::Blue],
            &[(0, 1), (0, 2), (1, 2)],
        )
    }

    #[test]
    fn observers_see_every_step_ending_in_the_final_state() {
        let csp = three_colour_triangle();
        let mut solver = SolverBuilder::new()
            .checking(CheckingStrategySelector::ForwardChecking)
            .build_verbose::<MapColouringProblem>();

        let seen: Rc<RefCell<Vec<SolveProgress<Colour>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        solver.subscribe(Box::new(move |progress: &SolveProgress<Colour>| {
            sink.borrow_mut().push(progress.clone());
        }));

        let result = solver.solve(&csp, &CancellationToken::new()).unwrap();
        assert!(result.is_solved());

        let seen = seen.borrow();
        assert!(!seen.is_empty());
        assert_eq!(seen.last().unwrap().state, SolverState::Final);
        assert!(seen.iter().any(|progress| progress.last_assignment.is_some()));
    }

    #[test]
    fn an_observer_may_cancel_mid_search() {
        let csp = three_colour_triangle();
        let mut solver = SolverBuilder::new().build_verbose::<MapColouringProblem>();

        let token = CancellationToken::new();
        let trigger = token.clone();
        solver.subscribe(Box::new(move |_: &SolveProgress<Colour>| {
            trigger.cancel();
        }));

        let error = solver.solve(&csp, &token).unwrap_err();
        assert!(matches!(error.inner(), SolverError::Cancelled));

        // The underlying instance reset itself and remains usable.
        let result = solver.solve(&csp, &CancellationToken::new()).unwrap();
        assert!(result.is_solved());
    }
}
