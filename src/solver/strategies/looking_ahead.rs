//! Partial and full looking ahead.
//!
//! Both extend forward checking with a single wave of future-against-future
//! revisions after each assignment. Partial looking ahead revises each
//! future node against the adjacent futures deeper than it only; full
//! looking ahead revises every adjacent ordered pair of futures. Neither
//! re-enqueues on change, so the wave terminates after one pass.

use crate::solver::{
    csp::BinaryCsp,
    solution::{StepCounters, StepKind},
    strategies::{
        forward_checking::ForwardChecking,
        look_ahead::{revise, LookAheadPolicy, ReductionTrail},
    },
    tree::SearchTree,
    work_list::ArcQueue,
};

/// Drains the queue, revising each arc once. Returns `false` as soon as a
/// revision wipes out the operand's candidates.
fn drain_arcs<C: BinaryCsp>(
    tree: &mut SearchTree,
    trail: &mut ReductionTrail,
    queue: &mut ArcQueue,
    level: usize,
    csp: &C,
    counters: &mut StepCounters,
) -> bool {
    while let Some((operand, context)) = queue.pop_front() {
        revise(
            tree,
            trail,
            operand,
            context,
            level as isize,
            csp,
            counters,
            StepKind::Assigning,
        );
        if tree.node(operand).candidate_count() == 0 {
            queue.clear();
            return false;
        }
    }
    true
}

pub struct PartialLookingAhead;

impl LookAheadPolicy for PartialLookingAhead {
    fn propagate<C: BinaryCsp>(
        tree: &mut SearchTree,
        trail: &mut ReductionTrail,
        queue: &mut ArcQueue,
        level: usize,
        csp: &C,
        counters: &mut StepCounters,
    ) -> bool {
        if !ForwardChecking::propagate(tree, trail, queue, level, csp, counters) {
            return false;
        }
        queue.clear();
        for operand in level + 1..tree.len() {
            for context in operand + 1..tree.len() {
                if csp.adjacent(tree.node(operand).variable(), tree.node(context).variable()) {
                    queue.push_back(operand, context);
                }
            }
        }
        drain_arcs(tree, trail, queue, level, csp, counters)
    }
}

pub struct FullLookingAhead;

impl LookAheadPolicy for FullLookingAhead {
    fn propagate<C: BinaryCsp>(
        tree: &mut SearchTree,
        trail: &mut ReductionTrail,
        queue: &mut ArcQueue,
        level: usize,
        csp: &C,
        counters: &mut StepCounters,
    ) -> bool {
        if !ForwardChecking::propagate(tree, trail, queue, level, csp, counters) {
            return false;
        }
        queue.clear();
        for operand in level + 1..tree.len() {
            for context in level + 1..tree.len() {
                if operand != context
                    && csp.adjacent(tree.node(operand).variable(), tree.node(context).variable())
                {
                    queue.push_back(operand, context);
                }
            }
        }
        drain_arcs(tree, trail, queue, level, csp, counters)
    }
}

#[cfg(test)]
mod tests {
    use crate::problems::map_colouring::{Colour, MapColouringProblem};
    use crate::problems::n_queens::NQueensProblem;
    use crate::solver::strategies::{testing, CheckingStrategySelector};

    #[test]
    fn partial_looking_ahead_solves_four_queens() {
        let (solved, _) = testing::run_selector(
            CheckingStrategySelector::PartialLookingAhead,
            &NQueensProblem::new(4),
        );
        assert!(solved);
    }

    #[test]
    fn full_looking_ahead_solves_four_queens() {
        let (solved, _) = testing::run_selector(
            CheckingStrategySelector::FullLookingAhead,
            &NQueensProblem::new(4),
        );
        assert!(solved);
    }

    #[test]
    fn full_looking_ahead_checks_at_least_as_much_per_wave_as_partial() {
        let csp = NQueensProblem::new(5);
        let (_, partial) =
            testing::run_selector(CheckingStrategySelector::PartialLookingAhead, &csp);
        let (_, full) = testing::run_selector(CheckingStrategySelector::FullLookingAhead, &csp);
        // Same search outcome, but the full variant revises both directions
        // of every future arc.
        assert!(full.assigning_steps >= partial.assigning_steps);
    }

    #[test]
    fn insoluble_triangle_is_detected_on_the_first_level() {
        let csp = MapColouringProblem::new(
            3,
            vec![Colour::Red, Colour::Green],
            &[(0, 1), (0, 2), (1, 2)],
        );
        for selector in [
            CheckingStrategySelector::PartialLookingAhead,
            CheckingStrategySelector::FullLookingAhead,
        ] {
            let (solved, counters) = testing::run_selector(selector, &csp);
            assert!(!solved);
            // Every candidate of the first node wipes out a future domain,
            // so the single backtrack is off the root.
            assert_eq!(counters.backtracking_steps, 1);
        }
    }
}
