//! Per-variable search state.

use std::cell::OnceCell;
use std::collections::VecDeque;

use im::OrdSet;

use crate::solver::{
    csp::{BinaryCsp, DomainValue, Variable},
    tree::ROOT_LEVEL,
};

/// One node of the search tree, owning the mutable search state of a single
/// variable.
///
/// The node's `variable` is fixed at populate time; its `level` is the
/// position the node currently occupies in the tree and changes only when an
/// ordering strategy swaps nodes. Domain, degree, and tightness data travel
/// with the node across swaps.
///
/// `candidates` and `rejected` partition the untried and tried-and-failed
/// portions of the domain; together with any values pruned by a prospective
/// strategy (recorded on its trail), they always account for the full
/// original domain.
#[derive(Debug)]
pub struct SearchNode {
    variable: Variable,
    level: usize,
    degree: usize,
    domain_size: usize,
    pub(crate) value: Option<DomainValue>,
    pub(crate) candidates: VecDeque<DomainValue>,
    pub(crate) rejected: Vec<DomainValue>,
    tightness: OnceCell<f64>,
    /// Earlier levels this node is checked against; meaning depends on the
    /// retrospective policy (all earlier levels for naive backtracking,
    /// adjacency-filtered otherwise). Populated when the node becomes
    /// current and cleared when the search backtracks past it.
    pub(crate) ancestors: OrdSet<usize>,
    /// Realized conflict levels (conflict-directed backjumping) or the
    /// structurally induced ancestor set (graph-based backjumping).
    pub(crate) conflicts: OrdSet<usize>,
    /// Running-max culprit level for plain backjumping.
    pub(crate) jump_level: isize,
}

impl SearchNode {
    pub(crate) fn new<C: BinaryCsp>(variable: Variable, level: usize, csp: &C) -> Self {
        let domain_size = csp.domain_size(variable);
        Self {
            variable,
            level,
            degree: csp.degree(variable),
            domain_size,
            value: None,
            candidates: (0..domain_size).collect(),
            rejected: Vec::new(),
            tightness: OnceCell::new(),
            ancestors: OrdSet::new(),
            conflicts: OrdSet::new(),
            jump_level: ROOT_LEVEL,
        }
    }

    pub fn variable(&self) -> Variable {
        self.variable
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub(crate) fn set_level(&mut self, level: usize) {
        self.level = level;
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn domain_size(&self) -> usize {
        self.domain_size
    }

    /// The current tentative value, if the node holds one.
    pub fn value(&self) -> Option<DomainValue> {
        self.value
    }

    /// Number of untried candidates remaining.
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// The cached sum of pairwise tightness to adjacent variables, computed
    /// at most once per solve.
    pub fn sum_tightness<C: BinaryCsp>(&self, csp: &C) -> f64 {
        *self
            .tightness
            .get_or_init(|| csp.sum_tightness(self.variable))
    }

    /// Moves the current tentative value to the rejected list.
    pub(crate) fn reject_value(&mut self) {
        if let Some(value) = self.value.take() {
            self.rejected.push(value);
        }
    }

    /// Returns every rejected candidate to the untried queue.
    pub(crate) fn restore_rejected(&mut self) {
        for candidate in self.rejected.drain(..) {
            self.candidates.push_back(candidate);
        }
    }

    /// Clears ancestor, conflict, and backtrack bookkeeping. Called when the
    /// search backtracks past this node.
    pub(crate) fn clear_search_data(&mut self) {
        self.ancestors = OrdSet::new();
        self.conflicts = OrdSet::new();
        self.jump_level = ROOT_LEVEL;
    }
}
