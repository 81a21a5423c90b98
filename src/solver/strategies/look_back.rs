//! The retrospective (look-back) search family: naive backtracking and the
//! three backjumping variants.
//!
//! These strategies test each tentative assignment against already-assigned
//! nodes only. A [`LookBackPolicy`] supplies the three points where the
//! algorithms differ: how a node's ancestor data is seeded when it becomes
//! current, how a candidate is checked against those ancestors, and where
//! the search resumes after failure.

use std::marker::PhantomData;

use im::OrdSet;
use tracing::debug;

use crate::solver::{
    csp::{Assignment, BinaryCsp},
    heuristics::ordering::OrderingStrategy,
    solution::{StepCounters, StepKind},
    strategies::CheckingStrategy,
    tree::{SearchTree, ROOT_LEVEL},
};

/// The strategy-specific pieces of a retrospective search.
///
/// Policies are stateless markers; all mutable state lives on the tree's
/// nodes so that reordering and backtracking keep it attached to the right
/// variable.
pub trait LookBackPolicy: 'static {
    /// Seeds the ancestor/backtrack data of the node at `level` as it
    /// becomes the current node.
    fn visit<C: BinaryCsp>(tree: &mut SearchTree, level: usize, csp: &C);

    /// Tests the tentative value of the node at `level` against its
    /// ancestors, recording culprit data on failure. Each pairwise
    /// consistency evaluation is charged to the assigning counter.
    fn check<C: BinaryCsp>(
        tree: &mut SearchTree,
        level: usize,
        csp: &C,
        counters: &mut StepCounters,
    ) -> bool;

    /// The level the search should resume at after the node at `level`
    /// exhausted its candidates.
    fn backtrack_level(tree: &SearchTree, level: usize) -> isize;

    /// Merges the backtracking node's conflict data into the target node
    /// before it is cleared. Chronological policies leave this empty.
    fn absorb(_tree: &mut SearchTree, _from: usize, _target: usize) {}
}

/// Seeds `level`'s ancestors with every earlier level whose variable is
/// adjacent to it.
pub(crate) fn adjacent_ancestors<C: BinaryCsp>(
    tree: &SearchTree,
    level: usize,
    csp: &C,
) -> OrdSet<usize> {
    let variable = tree.node(level).variable();
    (0..level)
        .filter(|&earlier| csp.adjacent(variable, tree.node(earlier).variable()))
        .collect()
}

/// Merges `from`'s conflict set, minus the target level itself, into
/// `target`'s conflict set.
pub(crate) fn absorb_conflicts(tree: &mut SearchTree, from: usize, target: usize) {
    let absorbed = tree.node(from).conflicts.clone().without(&target);
    let node = tree.node_mut(target);
    node.conflicts = node.conflicts.clone().union(absorbed);
}

/// The deepest committed assignment at or above the cursor, resolved back to
/// a caller-level value.
pub(crate) fn present_assignment<C: BinaryCsp>(
    tree: &SearchTree,
    level: isize,
    csp: &C,
) -> Option<Assignment<C::Value>> {
    let mut level = level.min(tree.leaf_level() - 1);
    while level > ROOT_LEVEL {
        let node = tree.node(level as usize);
        if let Some(index) = node.value() {
            return Some(Assignment {
                variable: node.variable(),
                value: csp.value(node.variable(), index),
            });
        }
        level -= 1;
    }
    None
}

/// The shared state machine of the look-back family.
pub struct RetrospectiveSearch<P: LookBackPolicy> {
    tree: SearchTree,
    level: isize,
    safe: bool,
    counters: StepCounters,
    _policy: PhantomData<P>,
}

impl<P: LookBackPolicy> RetrospectiveSearch<P> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: SearchTree::with_capacity(capacity),
            level: ROOT_LEVEL,
            safe: false,
            counters: StepCounters::default(),
            _policy: PhantomData,
        }
    }

    /// Candidate partition invariant: for every node, the untried, rejected,
    /// and currently held values account for the full original domain.
    #[cfg(debug_assertions)]
    fn assert_partition(&self) {
        for level in 0..self.tree.len() {
            let node = self.tree.node(level);
            let held = usize::from(node.value().is_some());
            debug_assert_eq!(
                node.candidate_count() + node.rejected.len() + held,
                node.domain_size(),
                "candidate partition violated at level {level}"
            );
        }
    }
}

impl<C: BinaryCsp, P: LookBackPolicy> CheckingStrategy<C> for RetrospectiveSearch<P> {
    fn populate(&mut self, csp: &C) {
        self.tree.populate(csp);
        self.level = ROOT_LEVEL;
        self.safe = false;
        self.counters.reset();
    }

    fn simplify(&mut self, _csp: &C) {
        // No domain reduction before search in this family; only the
        // initial safety check.
        self.counters.record(StepKind::Simplifying);
        self.safe = (0..self.tree.len()).all(|level| self.tree.node(level).candidate_count() > 0);
    }

    fn try_assign(&mut self, csp: &C) {
        self.counters.record(StepKind::Assigning);
        let level = self.level as usize;
        self.safe = false;
        while !self.safe {
            let candidate = match self.tree.node_mut(level).candidates.pop_front() {
                Some(candidate) => candidate,
                None => break,
            };
            self.tree.node_mut(level).value = Some(candidate);
            if P::check(&mut self.tree, level, csp, &mut self.counters) {
                self.safe = true;
            } else {
                self.tree.node_mut(level).reject_value();
            }
        }
        #[cfg(debug_assertions)]
        self.assert_partition();
    }

    fn backtrack(&mut self, _csp: &C) {
        self.counters.record(StepKind::Backtracking);
        let level = self.level as usize;
        self.tree.node_mut(level).restore_rejected();

        let target = P::backtrack_level(&self.tree, level);
        if target > ROOT_LEVEL {
            P::absorb(&mut self.tree, level, target as usize);
        }
        self.tree.node_mut(level).clear_search_data();

        // Fully restore every level jumped over.
        let floor = if target > ROOT_LEVEL { target as usize + 1 } else { 0 };
        for undone in (floor..level).rev() {
            self.counters.record(StepKind::Backtracking);
            let node = self.tree.node_mut(undone);
            node.reject_value();
            node.restore_rejected();
            node.clear_search_data();
        }

        if target < self.level - 1 {
            debug!(from = level, to = target, "backjumping over blameless levels");
        }
        self.level = target;
        if target > ROOT_LEVEL {
            let node = self.tree.node_mut(target as usize);
            node.reject_value();
            self.safe = node.candidate_count() > 0;
        } else {
            self.safe = false;
        }
        #[cfg(debug_assertions)]
        self.assert_partition();
    }

    fn optimize(&mut self, csp: &C, ordering: &dyn OrderingStrategy<C>) {
        let level = self.level as usize;
        self.tree.reorder(level, csp, ordering);
        P::visit(&mut self.tree, level, csp);
    }

    fn advance(&mut self) {
        self.level += 1;
    }

    fn reset(&mut self) {
        self.tree.reset();
        self.level = ROOT_LEVEL;
        self.safe = false;
    }

    fn is_safe(&self) -> bool {
        self.safe
    }

    fn search_level(&self) -> isize {
        self.level
    }

    fn leaf_level(&self) -> isize {
        self.tree.leaf_level()
    }

    fn assignments(&self, csp: &C) -> Vec<Assignment<C::Value>> {
        self.tree.assignments(csp)
    }

    fn present_assignment(&self, csp: &C) -> Option<Assignment<C::Value>> {
        present_assignment(&self.tree, self.level, csp)
    }

    fn counters(&self) -> StepCounters {
        self.counters
    }
}
