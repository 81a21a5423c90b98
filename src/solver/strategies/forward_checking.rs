//! Forward checking.

use crate::solver::{
    csp::BinaryCsp,
    solution::{StepCounters, StepKind},
    strategies::look_ahead::{revise, LookAheadPolicy, ReductionTrail},
    tree::SearchTree,
    work_list::ArcQueue,
};

/// After each tentative assignment, removes the candidates of every adjacent
/// future node that conflict with the new value. A future node left with an
/// empty candidate list rejects the assignment immediately.
pub struct ForwardChecking;

impl LookAheadPolicy for ForwardChecking {
    fn propagate<C: BinaryCsp>(
        tree: &mut SearchTree,
        trail: &mut ReductionTrail,
        _queue: &mut ArcQueue,
        level: usize,
        csp: &C,
        counters: &mut StepCounters,
    ) -> bool {
        let variable = tree.node(level).variable();
        for future in level + 1..tree.len() {
            if !csp.adjacent(tree.node(future).variable(), variable) {
                continue;
            }
            revise(
                tree,
                trail,
                future,
                level,
                level as isize,
                csp,
                counters,
                StepKind::Assigning,
            );
            if tree.node(future).candidate_count() == 0 {
                return false;
            }
        }
        true
    }
}
