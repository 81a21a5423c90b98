//! Maintaining arc consistency (MAC).

use crate::solver::{
    csp::BinaryCsp,
    solution::{StepCounters, StepKind},
    strategies::look_ahead::{revise, LookAheadPolicy, ReductionTrail},
    tree::{SearchTree, ROOT_LEVEL},
    work_list::ArcQueue,
};

/// Runs AC-3 to a fixpoint over the arcs in the queue, drawing re-revision
/// arcs from `floor..tree.len()`. Reductions are recorded at `record_at`.
/// Returns `false` on a domain wipeout.
fn achieve_arc_consistency<C: BinaryCsp>(
    tree: &mut SearchTree,
    trail: &mut ReductionTrail,
    queue: &mut ArcQueue,
    floor: usize,
    record_at: isize,
    csp: &C,
    counters: &mut StepCounters,
    kind: StepKind,
) -> bool {
    while let Some((operand, context)) = queue.pop_front() {
        let changed = revise(tree, trail, operand, context, record_at, csp, counters, kind);
        if tree.node(operand).candidate_count() == 0 {
            queue.clear();
            return false;
        }
        if changed {
            for earlier in floor..tree.len() {
                if earlier != operand
                    && earlier != context
                    && csp.adjacent(tree.node(earlier).variable(), tree.node(operand).variable())
                {
                    queue.push_back(earlier, operand);
                }
            }
        }
    }
    true
}

/// Re-establishes arc consistency over the future subproblem after every
/// assignment, and makes the whole problem arc-consistent before search
/// begins. The pre-search reductions are recorded at the root level and are
/// never undone.
pub struct MaintainingArcConsistency;

impl LookAheadPolicy for MaintainingArcConsistency {
    fn propagate<C: BinaryCsp>(
        tree: &mut SearchTree,
        trail: &mut ReductionTrail,
        queue: &mut ArcQueue,
        level: usize,
        csp: &C,
        counters: &mut StepCounters,
    ) -> bool {
        queue.clear();
        let variable = tree.node(level).variable();
        for future in level + 1..tree.len() {
            if csp.adjacent(tree.node(future).variable(), variable) {
                queue.push_back(future, level);
            }
        }
        achieve_arc_consistency(
            tree,
            trail,
            queue,
            level + 1,
            level as isize,
            csp,
            counters,
            StepKind::Assigning,
        )
    }

    fn simplify<C: BinaryCsp>(
        tree: &mut SearchTree,
        trail: &mut ReductionTrail,
        queue: &mut ArcQueue,
        csp: &C,
        counters: &mut StepCounters,
    ) {
        queue.clear();
        for operand in 0..tree.len() {
            for context in 0..tree.len() {
                if operand != context
                    && csp.adjacent(tree.node(operand).variable(), tree.node(context).variable())
                {
                    queue.push_back(operand, context);
                }
            }
        }
        achieve_arc_consistency(
            tree,
            trail,
            queue,
            0,
            ROOT_LEVEL,
            csp,
            counters,
            StepKind::Simplifying,
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::problems::map_colouring::{Colour, MapColouringProblem};
    use crate::problems::n_queens::NQueensProblem;
    use crate::solver::strategies::{testing, CheckingStrategySelector};

    #[test]
    fn insoluble_triangle_is_rejected_before_any_assignment() {
        let csp = MapColouringProblem::new(
            3,
            vec![Colour::Red],
            &[(0, 1), (0, 2), (1, 2)],
        );
        let (solved, counters) = testing::run_selector(
            CheckingStrategySelector::MaintainingArcConsistency,
            &csp,
        );
        assert!(!solved);
        // The pre-search fixpoint wipes a domain out, so no assignment is
        // ever attempted.
        assert_eq!(counters.assigning_steps, 0);
        assert_eq!(counters.backtracking_steps, 0);
        assert!(counters.simplifying_steps > 0);
    }

    #[test]
    fn solves_six_queens_without_missing_solutions() {
        let (solved, _) = testing::run_selector(
            CheckingStrategySelector::MaintainingArcConsistency,
            &NQueensProblem::new(6),
        );
        assert!(solved);
    }

    #[test]
    fn propagation_reaches_nodes_beyond_the_assigned_neighbourhood() {
        // On a two-coloured path the first assignment determines every
        // other node, and only fixpoint propagation carries that past the
        // immediate neighbour.
        let csp = MapColouringProblem::new(
            4,
            vec![Colour::Red, Colour::Green],
            &[(0, 1), (1, 2), (2, 3)],
        );
        let (solved, counters) = testing::run_selector(
            CheckingStrategySelector::MaintainingArcConsistency,
            &csp,
        );
        assert!(solved);
        assert_eq!(counters.backtracking_steps, 0);
    }
}
