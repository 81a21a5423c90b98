//! The outcome of a solve: assignments plus step accounting.

use serde::{Deserialize, Serialize};

use crate::solver::csp::Assignment;

/// Which counter a unit of search work is charged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Simplifying,
    Assigning,
    Backtracking,
}

/// Deterministic per-category step counts for one solve.
///
/// One unit is charged per `simplify`/`try_assign`/`backtrack` invocation,
/// plus one per pairwise consistency or support evaluation performed inside
/// it, plus one per intervening level undone by a backjump. The total is
/// kept in lockstep with the per-category counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCounters {
    pub simplifying_steps: u64,
    pub assigning_steps: u64,
    pub backtracking_steps: u64,
    pub total_steps: u64,
}

impl StepCounters {
    pub(crate) fn record(&mut self, kind: StepKind) {
        match kind {
            StepKind::Simplifying => self.simplifying_steps += 1,
            StepKind::Assigning => self.assigning_steps += 1,
            StepKind::Backtracking => self.backtracking_steps += 1,
        }
        self.total_steps += 1;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The result of a completed solve.
///
/// `assignments` is complete (one entry per variable) iff the search reached
/// the leaf level; a search exhausted at the root yields an empty set. "No
/// solution" is a successful outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult<V> {
    pub assignments: Vec<Assignment<V>>,
    pub steps: StepCounters,
}

impl<V> SolveResult<V> {
    /// Whether the search found a complete assignment.
    pub fn is_solved(&self) -> bool {
        !self.assignments.is_empty()
    }
}
