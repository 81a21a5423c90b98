//! The solver runtime: drives a checking strategy and an ordering strategy
//! through the search cycle until the tree is solved or exhausted.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Result, SolverError},
    solver::{
        cancellation::CancellationToken,
        csp::BinaryCsp,
        heuristics::{
            build_ordering_strategy, ordering::OrderingStrategy, OrderingStrategySelector,
        },
        solution::SolveResult,
        strategies::{build_checking_strategy, CheckingStrategy, CheckingStrategySelector},
        verbose::{SolveProgress, VerboseSolver},
    },
};

/// The externally observable phase of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverState {
    /// No search work has happened yet.
    Initial,
    /// The partial assignment may still extend to a solution.
    Safe,
    /// The current node exhausted its candidates; backtracking.
    Unsafe,
    /// The search terminated, solved or exhausted.
    Final,
}

/// A reusable solving instance binding a checking strategy to an ordering
/// strategy.
///
/// `solve` is synchronous and cooperative: it polls the given
/// [`CancellationToken`] once per loop iteration. The instance refuses
/// reentrant use and resets its search tree on every exit path, so a single
/// solver may serve any number of consecutive solves.
pub struct Solver<C: BinaryCsp> {
    checking: Box<dyn CheckingStrategy<C>>,
    ordering: Box<dyn OrderingStrategy<C>>,
    busy: bool,
}

impl<C: BinaryCsp> Solver<C> {
    /// Runs the search to completion. Exhaustion is a normal outcome with an
    /// empty assignment set; only a zero-variable projection, reentrant use,
    /// or cancellation produce errors.
    pub fn solve(&mut self, csp: &C, token: &CancellationToken) -> Result<SolveResult<C::Value>> {
        self.solve_with(csp, token, &mut |_| {})
    }

    /// The step counters accumulated by the most recent solve.
    pub fn counters(&self) -> crate::solver::solution::StepCounters {
        self.checking.counters()
    }

    pub(crate) fn solve_with(
        &mut self,
        csp: &C,
        token: &CancellationToken,
        on_step: &mut dyn FnMut(&SolveProgress<C::Value>),
    ) -> Result<SolveResult<C::Value>> {
        if csp.variable_count() == 0 {
            return Err(SolverError::ProblemNotModelled.into());
        }
        if self.busy {
            return Err(SolverError::SolverBusy.into());
        }
        self.busy = true;
        let outcome = self.run(csp, token, on_step);
        self.checking.reset();
        self.busy = false;
        outcome
    }

    fn run(
        &mut self,
        csp: &C,
        token: &CancellationToken,
        on_step: &mut dyn FnMut(&SolveProgress<C::Value>),
    ) -> Result<SolveResult<C::Value>> {
        let checking = self.checking.as_mut();
        checking.populate(csp);
        on_step(&SolveProgress::capture(SolverState::Initial, checking, csp));
        checking.simplify(csp);
        let mut state = if checking.is_safe() {
            checking.advance();
            checking.optimize(csp, self.ordering.as_ref());
            SolverState::Safe
        } else {
            debug!("projection rejected before search");
            SolverState::Final
        };
        on_step(&SolveProgress::capture(state, checking, csp));

        while state != SolverState::Final {
            if token.is_cancelled() {
                debug!(level = checking.search_level(), "solve cancelled");
                return Err(SolverError::Cancelled.into());
            }
            match state {
                SolverState::Safe => {
                    checking.try_assign(csp);
                    if checking.is_safe() {
                        checking.advance();
                        if checking.search_level() == checking.leaf_level() {
                            state = SolverState::Final;
                        } else {
                            checking.optimize(csp, self.ordering.as_ref());
                        }
                    } else {
                        state = SolverState::Unsafe;
                    }
                }
                SolverState::Unsafe => {
                    checking.backtrack(csp);
                    if checking.search_level() <= checking.root_level() {
                        state = SolverState::Final;
                    } else if checking.is_safe() {
                        state = SolverState::Safe;
                    }
                }
                SolverState::Initial | SolverState::Final => unreachable!(),
            }
            on_step(&SolveProgress::capture(state, checking, csp));
        }

        let solved = checking.search_level() == checking.leaf_level();
        let assignments = if solved {
            checking.assignments(csp)
        } else {
            Vec::new()
        };
        debug!(solved, total_steps = checking.counters().total_steps, "search finished");
        Ok(SolveResult {
            assignments,
            steps: checking.counters(),
        })
    }
}

/// Configures and constructs [`Solver`] and [`VerboseSolver`] instances.
#[derive(Debug, Clone)]
pub struct SolverBuilder {
    capacity: usize,
    checking: CheckingStrategySelector,
    ordering: OrderingStrategySelector,
    step_delay: Option<Duration>,
}

impl Default for SolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverBuilder {
    pub fn new() -> Self {
        Self {
            capacity: 0,
            checking: CheckingStrategySelector::NaiveBacktracking,
            ordering: OrderingStrategySelector::NaturalOrdering,
            step_delay: None,
        }
    }

    /// Node-capacity hint for the search tree allocation.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn checking(mut self, selector: CheckingStrategySelector) -> Self {
        self.checking = selector;
        self
    }

    pub fn ordering(mut self, selector: OrderingStrategySelector) -> Self {
        self.ordering = selector;
        self
    }

    /// Pause inserted between steps by the verbose solver.
    pub fn step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = Some(delay);
        self
    }

    pub fn build<C: BinaryCsp>(&self) -> Solver<C> {
        Solver {
            checking: build_checking_strategy(self.checking, self.capacity),
            ordering: build_ordering_strategy(self.ordering),
            busy: false,
        }
    }

    pub fn build_verbose<C: BinaryCsp>(&self) -> VerboseSolver<C> {
        VerboseSolver::new(self.build(), self.step_delay)
    }
}
