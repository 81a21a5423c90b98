//! The four variable-ordering heuristics.

use crate::solver::{csp::BinaryCsp, tree::TreeView};

/// Floating-point equality margin for tightness comparisons.
const TIGHTNESS_EPSILON: f64 = 1e-9;

/// A strategy for choosing which unassigned node should occupy the current
/// search level next.
///
/// Implementations pick a level from `[search_level, leaf_level - 1]`; the
/// tree then swaps the chosen node into place. Ties are broken by higher
/// degree, then by the lower level, so every heuristic is deterministic.
pub trait OrderingStrategy<C: BinaryCsp> {
    fn swap_level(&self, view: &TreeView<'_, C>, search_level: usize) -> usize;
}

/// Keeps nodes in their current order: always returns the search level.
pub struct NaturalOrdering;

impl<C: BinaryCsp> OrderingStrategy<C> for NaturalOrdering {
    fn swap_level(&self, _view: &TreeView<'_, C>, search_level: usize) -> usize {
        search_level
    }
}

/// Brelaz's fail-first rule: the node with the fewest remaining candidates,
/// ties broken by highest degree.
pub struct BrelazHeuristic;

impl<C: BinaryCsp> OrderingStrategy<C> for BrelazHeuristic {
    fn swap_level(&self, view: &TreeView<'_, C>, search_level: usize) -> usize {
        let mut best = search_level;
        for level in search_level + 1..view.len() {
            let node = view.node(level);
            let best_node = view.node(best);
            let better = node.candidate_count() < best_node.candidate_count()
                || (node.candidate_count() == best_node.candidate_count()
                    && node.degree() > best_node.degree());
            if better {
                best = level;
            }
        }
        best
    }
}

/// The node adjacent to the most already-placed (earlier-level) nodes, ties
/// broken by highest degree.
pub struct MaxCardinality;

impl MaxCardinality {
    fn cardinality<C: BinaryCsp>(
        view: &TreeView<'_, C>,
        level: usize,
        search_level: usize,
    ) -> usize {
        (0..search_level)
            .filter(|&placed| view.adjacent(level, placed))
            .count()
    }
}

impl<C: BinaryCsp> OrderingStrategy<C> for MaxCardinality {
    fn swap_level(&self, view: &TreeView<'_, C>, search_level: usize) -> usize {
        let mut best = search_level;
        let mut best_cardinality = Self::cardinality(view, search_level, search_level);
        for level in search_level + 1..view.len() {
            let node = view.node(level);
            // A node's cardinality is bounded by its degree, so nodes that
            // cannot reach the current maximum are skipped without scanning.
            if node.degree() < best_cardinality {
                continue;
            }
            let cardinality = Self::cardinality(view, level, search_level);
            let better = cardinality > best_cardinality
                || (cardinality == best_cardinality && node.degree() > view.node(best).degree());
            if better {
                best = level;
                best_cardinality = cardinality;
            }
        }
        best
    }
}

/// The node with the highest cached tightness sum, ties broken by highest
/// degree.
pub struct MaxTightness;

impl<C: BinaryCsp> OrderingStrategy<C> for MaxTightness {
    fn swap_level(&self, view: &TreeView<'_, C>, search_level: usize) -> usize {
        let mut best = search_level;
        let mut best_tightness = view.sum_tightness(search_level);
        for level in search_level + 1..view.len() {
            let tightness = view.sum_tightness(level);
            let tied = (tightness - best_tightness).abs() <= TIGHTNESS_EPSILON;
            let better = (!tied && tightness > best_tightness)
                || (tied && view.node(level).degree() > view.node(best).degree());
            if better {
                best = level;
                best_tightness = tightness;
            }
        }
        best
    }
}
