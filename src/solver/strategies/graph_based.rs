//! Graph-based backjumping (Dechter's algorithm).

use crate::solver::{
    csp::BinaryCsp,
    solution::{StepCounters, StepKind},
    strategies::look_back::{absorb_conflicts, adjacent_ancestors, LookBackPolicy},
    tree::{SearchTree, ROOT_LEVEL},
};

/// Blames the constraint graph rather than the observed conflicts: a node's
/// conflict set is pre-seeded with every adjacent ancestor, so exhausting it
/// jumps to its deepest graph neighbour regardless of which values actually
/// clashed. The jumped-from set is absorbed into the target to keep deeper
/// structure reachable.
pub struct GraphBasedBackjumping;

impl LookBackPolicy for GraphBasedBackjumping {
    fn visit<C: BinaryCsp>(tree: &mut SearchTree, level: usize, csp: &C) {
        let ancestors = adjacent_ancestors(tree, level, csp);
        let node = tree.node_mut(level);
        node.conflicts = ancestors.clone();
        node.ancestors = ancestors;
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
