//! Checking strategies: the pluggable consistency-checking and backtracking
//! algorithms driven by the solver runtime.
//!
//! The eight classical algorithms split into two families sharing a state
//! machine each: the retrospective (look-back) family in
//! [`look_back::RetrospectiveSearch`] and the prospective (look-ahead)
//! family in [`look_ahead::ProspectiveSearch`]. A policy type per algorithm
//! supplies the strategy-specific pieces, keeping the hot loop monomorphic.

pub mod arc_consistency;
pub mod backjumping;
pub mod backtracking;
pub mod conflict_directed;
pub mod forward_checking;
pub mod graph_based;
pub mod look_ahead;
pub mod look_back;
pub mod looking_ahead;

use serde::{Deserialize, Serialize};

use crate::solver::{
    csp::{Assignment, BinaryCsp},
    heuristics::ordering::OrderingStrategy,
    solution::StepCounters,
    tree::ROOT_LEVEL,
};
use look_ahead::ProspectiveSearch;
use look_back::RetrospectiveSearch;

/// The operation cycle every checking strategy exposes to the runtime.
///
/// The strategy owns the search tree and the cursor (`search_level`) into
/// it, ranging over `[ROOT_LEVEL, leaf_level]`. The runtime drives the
/// cycle: `populate` and `simplify` once, then `try_assign` /
/// `optimize` + `advance` while safe and `backtrack` while unsafe, until the
/// cursor reaches the root (exhausted) or the leaf (solved).
pub trait CheckingStrategy<C: BinaryCsp> {
    /// Builds the search tree from the projection and clears the counters.
    fn populate(&mut self, csp: &C);

    /// Optional pre-search domain reduction. Afterwards `is_safe` reports
    /// whether every node still has at least one candidate.
    fn simplify(&mut self, csp: &C);

    /// Pops untried candidates at the cursor until one passes the
    /// strategy's safety check or the candidates run out.
    fn try_assign(&mut self, csp: &C);

    /// Restores the cursor node, moves the cursor to the strategy-specific
    /// backtrack level (fully restoring every level jumped over), and
    /// rejects the candidate held there. A target at or below the root
    /// leaves the search exhausted with `is_safe() == false`.
    fn backtrack(&mut self, csp: &C);

    /// Reorders the not-yet-assigned nodes and performs visit setup for the
    /// node now at the cursor.
    fn optimize(&mut self, csp: &C, ordering: &dyn OrderingStrategy<C>);

    /// Moves the cursor one level deeper.
    fn advance(&mut self);

    /// Clears the search tree and all per-solve state.
    fn reset(&mut self);

    /// Whether the current partial assignment may still extend to a
    /// solution.
    fn is_safe(&self) -> bool;

    fn search_level(&self) -> isize;

    fn leaf_level(&self) -> isize;

    fn root_level(&self) -> isize {
        ROOT_LEVEL
    }

    /// Assignments for every node currently holding a committed value.
    fn assignments(&self, csp: &C) -> Vec<Assignment<C::Value>>;

    /// The assignment held by the node at the cursor, if any.
    fn present_assignment(&self, csp: &C) -> Option<Assignment<C::Value>>;

    fn counters(&self) -> StepCounters;
}

/// Selects one of the eight checking strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckingStrategySelector {
    NaiveBacktracking,
    Backjumping,
    ConflictDirectedBackjumping,
    GraphBasedBackjumping,
    ForwardChecking,
    PartialLookingAhead,
    FullLookingAhead,
    MaintainingArcConsistency,
}

impl CheckingStrategySelector {
    /// All eight strategies, handy for comparative tests and benches.
    pub const ALL: [CheckingStrategySelector; 8] = [
        CheckingStrategySelector::NaiveBacktracking,
        CheckingStrategySelector::Backjumping,
        CheckingStrategySelector::ConflictDirectedBackjumping,
        CheckingStrategySelector::GraphBasedBackjumping,
        CheckingStrategySelector::ForwardChecking,
        CheckingStrategySelector::PartialLookingAhead,
        CheckingStrategySelector::FullLookingAhead,
        CheckingStrategySelector::MaintainingArcConsistency,
    ];
}

impl std::fmt::Display for CheckingStrategySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CheckingStrategySelector::NaiveBacktracking => "naive backtracking",
            CheckingStrategySelector::Backjumping => "backjumping",
            CheckingStrategySelector::ConflictDirectedBackjumping => {
                "conflict-directed backjumping"
            }
            CheckingStrategySelector::GraphBasedBackjumping => "graph-based backjumping",
            CheckingStrategySelector::ForwardChecking => "forward checking",
            CheckingStrategySelector::PartialLookingAhead => "partial looking ahead",
            CheckingStrategySelector::FullLookingAhead => "full looking ahead",
            CheckingStrategySelector::MaintainingArcConsistency => "maintaining arc consistency",
        };
        f.write_str(name)
    }
}

/// Constructs the checking strategy for a selector, with a node-capacity
/// hint for the search tree.
pub fn build_checking_strategy<C: BinaryCsp>(
    selector: CheckingStrategySelector,
    capacity: usize,
) -> Box<dyn CheckingStrategy<C>> {
    match selector {
        CheckingStrategySelector::NaiveBacktracking => Box::new(RetrospectiveSearch::<
            backtracking::NaiveBacktracking,
        >::with_capacity(capacity)),
        CheckingStrategySelector::Backjumping => {
            Box::new(RetrospectiveSearch::<backjumping::Backjumping>::with_capacity(capacity))
        }
        CheckingStrategySelector::ConflictDirectedBackjumping => Box::new(RetrospectiveSearch::<
            conflict_directed::ConflictDirectedBackjumping,
        >::with_capacity(capacity)),
        CheckingStrategySelector::GraphBasedBackjumping => Box::new(RetrospectiveSearch::<
            graph_based::GraphBasedBackjumping,
        >::with_capacity(capacity)),
        CheckingStrategySelector::ForwardChecking => Box::new(ProspectiveSearch::<
            forward_checking::ForwardChecking,
        >::with_capacity(capacity)),
        CheckingStrategySelector::PartialLookingAhead => Box::new(ProspectiveSearch::<
            looking_ahead::PartialLookingAhead,
        >::with_capacity(capacity)),
        CheckingStrategySelector::FullLookingAhead => Box::new(ProspectiveSearch::<
            looking_ahead::FullLookingAhead,
        >::with_capacity(capacity)),
        CheckingStrategySelector::MaintainingArcConsistency => Box::new(ProspectiveSearch::<
            arc_consistency::MaintainingArcConsistency,
        >::with_capacity(capacity)),
    }
}
