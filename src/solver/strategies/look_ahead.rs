//! The prospective (look-ahead) search family: forward checking, partial
//! and full looking ahead, and maintaining arc consistency.
//!
//! These strategies prune the candidate lists of future nodes after each
//! tentative assignment, recording every removal on a [`ReductionTrail`] so
//! that rejecting the assignment restores the exact pre-assignment domains.
//! A [`LookAheadPolicy`] supplies the propagation scheme; the surrounding
//! state machine and its chronological backtracking are shared.

use std::marker::PhantomData;

use tracing::trace;

use crate::solver::{
    csp::{Assignment, BinaryCsp},
    heuristics::ordering::OrderingStrategy,
    solution::{StepCounters, StepKind},
    strategies::CheckingStrategy,
    tree::{SearchTree, ROOT_LEVEL},
    work_list::ArcQueue,
};

/// The propagation scheme of a prospective search.
pub trait LookAheadPolicy: 'static {
    /// Prunes future candidate lists after the node at `level` took a
    /// tentative value, recording removals at `level`. Returns `false` when
    /// some future node was wiped out; the caller then undoes the trail for
    /// `level` and rejects the value.
    fn propagate<C: BinaryCsp>(
        tree: &mut SearchTree,
        trail: &mut ReductionTrail,
        queue: &mut ArcQueue,
        level: usize,
        csp: &C,
        counters: &mut StepCounters,
    ) -> bool;

    /// Pre-search domain reduction, recorded at the root level so it is
    /// never undone. Most policies leave the domains untouched.
    fn simplify<C: BinaryCsp>(
        _tree: &mut SearchTree,
        _trail: &mut ReductionTrail,
        _queue: &mut ArcQueue,
        _csp: &C,
        _counters: &mut StepCounters,
    ) {
    }
}

/// One pruned candidate: which node lost which value while the node at
/// `level` held its tentative assignment.
#[derive(Debug, Clone, Copy)]
struct Reduction {
    level: isize,
    variable: usize,
    candidate: usize,
}

/// A LIFO log of domain reductions, undone level by level.
#[derive(Debug, Default)]
pub struct ReductionTrail {
    reductions: Vec<Reduction>,
}

impl ReductionTrail {
    pub(crate) fn record(&mut self, level: isize, variable: usize, candidate: usize) {
        self.reductions.push(Reduction {
            level,
            variable,
            candidate,
        });
    }

    /// Pops every reduction recorded at `level`, returning the pruned
    /// candidates to their nodes. Reductions are contiguous per level
    /// because levels are undone in reverse order of recording.
    pub(crate) fn undo(&mut self, tree: &mut SearchTree, level: isize) {
        while let Some(last) = self.reductions.last() {
            if last.level != level {
                break;
            }
            let reduction = self.reductions.pop().unwrap();
            tree.node_of_mut(reduction.variable)
                .candidates
                .push_back(reduction.candidate);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.reductions.clear();
    }

    #[cfg(debug_assertions)]
    fn pruned_count(&self, variable: usize) -> usize {
        self.reductions
            .iter()
            .filter(|reduction| reduction.variable == variable)
            .count()
    }
}

/// Removes from the node at `operand_level` every candidate with no support
/// in the live domain of the node at `context_level` (its committed value if
/// assigned, its candidate list otherwise). Removals are recorded at
/// `record_at`. Each pairwise support test is charged to `kind`. Returns
/// whether any candidate was removed.
pub(crate) fn revise<C: BinaryCsp>(
    tree: &mut SearchTree,
    trail: &mut ReductionTrail,
    operand_level: usize,
    context_level: usize,
    record_at: isize,
    csp: &C,
    counters: &mut StepCounters,
    kind: StepKind,
) -> bool {
    let operand_variable = tree.node(operand_level).variable();
    let context = tree.node(context_level);
    let context_variable = context.variable();
    let context_values: Vec<usize> = match context.value() {
        Some(value) => vec![value],
        None => context.candidates.iter().copied().collect(),
    };

    let candidates: Vec<usize> = tree.node(operand_level).candidates.iter().copied().collect();
    let mut changed = false;
    for candidate in candidates {
        let mut supported = false;
        for &context_value in &context_values {
            counters.record(kind);
            if csp.consistent(operand_variable, candidate, context_variable, context_value) {
                supported = true;
                break;
            }
        }
        if !supported {
            let node = tree.node(operand_level);
            let position = node
                .candidates
                .iter()
                .position(|&remaining| remaining == candidate)
                .unwrap();
            tree.node_mut(operand_level).candidates.remove(position);
            trail.record(record_at, operand_variable, candidate);
            changed = true;
        }
    }
    changed
}

/// The shared state machine of the look-ahead family. Backtracking is
/// always chronological; the pruning already embodies the conflict
/// knowledge the look-back family reconstructs.
pub struct ProspectiveSearch<P: LookAheadPolicy> {
    tree: SearchTree,
    trail: ReductionTrail,
    queue: ArcQueue,
    level: isize,
    safe: bool,
    counters: StepCounters,
    _policy: PhantomData<P>,
}

impl<P: LookAheadPolicy> ProspectiveSearch<P> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: SearchTree::with_capacity(capacity),
            trail: ReductionTrail::default(),
            queue: ArcQueue::default(),
            level: ROOT_LEVEL,
            safe: false,
            counters: StepCounters::default(),
            _policy: PhantomData,
        }
    }

    /// Candidate partition invariant: untried, rejected, held, and
    /// trail-pruned values account for the full original domain.
    #[cfg(debug_assertions)]
    fn assert_partition(&self) {
        for level in 0..self.tree.len() {
            let node = self.tree.node(level);
            let held = usize::from(node.value().is_some());
            let pruned = self.trail.pruned_count(node.variable());
            debug_assert_eq!(
                node.candidate_count() + node.rejected.len() + held + pruned,
                node.domain_size(),
                "candidate partition violated at level {level}"
            );
        }
    }
}

impl<C: BinaryCsp, P: LookAheadPolicy> CheckingStrategy<C> for ProspectiveSearch<P> {
    fn populate(&mut self, csp: &C) {
        self.tree.populate(csp);
        self.trail.clear();
        self.queue.clear();
        self.level = ROOT_LEVEL;
        self.safe = false;
        self.counters.reset();
    }

    fn simplify(&mut self, csp: &C) {
        self.counters.record(StepKind::Simplifying);
        P::simplify(
            &mut self.tree,
            &mut self.trail,
            &mut self.queue,
            csp,
            &mut self.counters,
        );
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
            if P::propagate(
                &mut self.tree,
                &mut self.trail,
                &mut self.queue,
                level,
                csp,
                &mut self.counters,
            ) {
                self.safe = true;
            } else {
                self.trail.undo(&mut self.tree, level as isize);
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
        self.tree.node_mut(level).clear_search_data();

        let target = level as isize - 1;
        trace!(from = level, to = target, "backtracking");
        self.level = target;
        if target > ROOT_LEVEL {
            self.trail.undo(&mut self.tree, target);
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
    }

    fn advance(&mut self) {
        self.level += 1;
    }

    fn reset(&mut self) {
        self.tree.reset();
        self.trail.clear();
        self.queue.clear();
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
        crate::solver::strategies::look_back::present_assignment(&self.tree, self.level, csp)
    }

    fn counters(&self) -> StepCounters {
        self.counters
    }
}
