//! Chronological backjumping (Gaschnig's algorithm).

use im::OrdSet;

use crate::solver::{
    csp::BinaryCsp,
    solution::{StepCounters, StepKind},
    strategies::look_back::{adjacent_ancestors, LookBackPolicy},
    tree::{SearchTree, ROOT_LEVEL},
};

/// Checks candidates against adjacency-filtered ancestors only, stopping at
/// the first conflict. Failure resumes at the deepest ancestor level that
/// conflicted for any candidate of the current visit (a running maximum); a
/// successful check resets the target to the immediate predecessor as a
/// safety net.
pub struct Backjumping;

impl LookBackPolicy for Backjumping {
    fn visit<C: BinaryCsp>(tree: &mut SearchTree, level: usize, csp: &C) {
        let ancestors = adjacent_ancestors(tree, level, csp);
        let node = tree.node_mut(level);
        node.ancestors = ancestors;
        node.conflicts = OrdSet::new();
        node.jump_level = ROOT_LEVEL;
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
                let node = tree.node_mut(level);
                node.jump_level = node.jump_level.max(earlier as isize);
                return false;
            }
        }
        tree.node_mut(level).jump_level = level as isize - 1;
        true
    }

    fn backtrack_level(tree: &SearchTree, level: usize) -> isize {
        tree.node(level).jump_level
    }
}
