//! Conflict-directed backjumping (Prosser's CBJ).

use im::OrdSet;

use crate::solver::{
    csp::BinaryCsp,
    solution::{StepCounters, StepKind},
    strategies::look_back::{absorb_conflicts, adjacent_ancestors, LookBackPolicy},
    tree::{SearchTree, ROOT_LEVEL},
};

/// Accumulates the set of ancestor levels that conflicted with any candidate
/// of the current visit and jumps to the deepest of them. On backtrack the
/// target level absorbs the abandoned node's conflict set, preserving
/// transitive conflict information across jumps.
pub struct ConflictDirectedBackjumping;

impl LookBackPolicy for ConflictDirectedBackjumping {
    fn visit<C: BinaryCsp>(tree: &mut SearchTree, level: usize, csp: &C) {
        let ancestors = adjacent_ancestors(tree, level, csp);
        let node = tree.node_mut(level);
        node.ancestors = ancestors;
        node.conflicts = OrdSet::new();
    }

    fn check<C: BinaryCsp>(
        tree: &mut SearchTree,
        level: usize,
        csp: &C,
        counters: &mut StepCounters,
    ) -> bool {
        let node = tree.node(level);
        let variable = node.variable();
        let value = node.value().unwrap();
        let ancestors: Vec<usize> = node.ancestors.iter().copied().collect();
        for earlier in ancestors {
            counters.record(StepKind::Assigning);
            let other = tree.node(earlier);
            if !csp.consistent(variable, value, other.variable(), other.value().unwrap()) {
                tree.node_mut(level).conflicts.insert(earlier);
                return false;
            }
        }
        true
    }

    fn backtrack_level(tree: &SearchTree, level: usize) -> isize {
        tree.node(level)
            .conflicts
            .get_max()
            .map_or(ROOT_LEVEL, |&deepest| deepest as isize)
    }

    fn absorb(tree: &mut SearchTree, from: usize, target: usize) {
        absorb_conflicts(tree, from, target);
    }
}

#[cfg(test)]
mod tests {
    use crate::problems::map_colouring::{Colour, MapColouringProblem};
    use crate::solver::strategies::{testing, CheckingStrategySelector};

    fn triangle() -> MapColouringProblem {
        MapColouringProblem::new(
            3,
            vec![Colour::Red, Colour::Green],
            &[(0, 1), (0, 2), (1, 2)],
        )
    }

    #[test]
    fn exhausts_the_triangle_with_fewer_steps_than_naive_backtracking() {
        let csp = triangle();
        let (naive_solved, naive) =
            testing::run_selector(CheckingStrategySelector::NaiveBacktracking, &csp);
        let (cbj_solved, cbj) = testing::run_selector(
            CheckingStrategySelector::ConflictDirectedBackjumping,
            &csp,
        );

        assert!(!naive_solved);
        assert!(!cbj_solved);
        assert!(cbj.backtracking_steps > 0);
        // The naive search re-checks non-culprit pairs the conflict sets
        // let CBJ skip.
        assert!(naive.total_steps > cbj.total_steps);
    }

    #[test]
    fn finds_a_four_colouring_of_a_wheel() {
        // A 5-wheel: hub 0 adjacent to every rim vertex, rim a cycle.
        let csp = MapColouringProblem::new(
            5,
            vec![Colour::Red, Colour::Green, Colour::Blue, Colour::Yellow],
            &[
                (0, 1),
                (0, 2),
                (0, 3),
                (0, 4),
                (1, 2),
                (2, 3),
                (3, 4),
                (4, 1),
            ],
        );
        let (solved, _) = testing::run_selector(
            CheckingStrategySelector::ConflictDirectedBackjumping,
            &csp,
        );
        assert!(solved);
    }
}
