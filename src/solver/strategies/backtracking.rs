//! Naive chronological backtracking.

use im::OrdSet;

use crate::solver::{
    csp::BinaryCsp,
    solution::{StepCounters, StepKind},
    strategies::look_back::LookBackPolicy,
    tree::SearchTree,
};

/// The simplest look-back policy: every earlier node is an ancestor, every
/// candidate is checked against all of them with no early exit, and failure
/// always resumes at the immediate predecessor.
pub struct NaiveBacktracking;

impl LookBackPolicy for NaiveBacktracking {
    fn visit<C: BinaryCsp>(tree: &mut SearchTree, level: usize, _csp: &C) {
        let node = tree.node_mut(level);
        node.ancestors = (0..level).collect::<OrdSet<usize>>();
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
        let mut consistent = true;
        let ancestors: Vec<usize> = node.ancestors.iter().copied().collect();
        for earlier in ancestors {
            counters.record(StepKind::Assigning);
            let other = tree.node(earlier);
            if !csp.consistent(variable, value, other.variable(), other.value().unwrap()) {
                consistent = false;
            }
        }
        consistent
    }

    fn backtrack_level(_tree: &SearchTree, level: usize) -> isize {
        level as isize - 1
    }
}
