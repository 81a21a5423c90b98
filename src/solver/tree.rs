//! The search tree: an indexable sequence of one node per variable.

use tracing::trace;

use crate::solver::{
    csp::{Assignment, BinaryCsp, Variable},
    heuristics::ordering::OrderingStrategy,
    node::SearchNode,
};

/// The level of the search cursor before any assignment has been made.
pub const ROOT_LEVEL: isize = -1;

/// Ordered container of search nodes, length = variable count.
///
/// The checking strategy owns the tree exclusively; ordering strategies see
/// it only through the narrow [`TreeView`] capability. Reordering swaps tree
/// positions, never variable identity.
#[derive(Debug, Default)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    /// Variable index -> current tree level.
    positions: Vec<usize>,
}

impl SearchTree {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            positions: Vec::with_capacity(capacity),
        }
    }

    /// Builds one node per variable, in natural variable order.
    pub fn populate<C: BinaryCsp>(&mut self, csp: &C) {
        self.nodes.clear();
        self.positions.clear();
        for variable in 0..csp.variable_count() {
            self.nodes.push(SearchNode::new(variable, variable, csp));
            self.positions.push(variable);
        }
    }

    /// Clears the tree. The structure is never retained across solves.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.positions.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The level past the deepest node; reaching it means every variable is
    /// assigned.
    pub fn leaf_level(&self) -> isize {
        self.nodes.len() as isize
    }

    pub fn node(&self, level: usize) -> &SearchNode {
        &self.nodes[level]
    }

    pub fn node_mut(&mut self, level: usize) -> &mut SearchNode {
        &mut self.nodes[level]
    }

    /// The tree level currently occupied by `variable`'s node.
    pub fn level_of(&self, variable: Variable) -> usize {
        self.positions[variable]
    }

    pub fn node_of_mut(&mut self, variable: Variable) -> &mut SearchNode {
        let level = self.positions[variable];
        &mut self.nodes[level]
    }

    /// Asks the ordering strategy which later node should occupy
    /// `search_level` next and swaps it into place, updating both nodes'
    /// levels and the position map.
    pub fn reorder<C: BinaryCsp>(
        &mut self,
        search_level: usize,
        csp: &C,
        ordering: &dyn OrderingStrategy<C>,
    ) {
        let chosen = ordering.swap_level(&self.view(csp), search_level);
        debug_assert!(chosen >= search_level && chosen < self.nodes.len());
        if chosen != search_level {
            trace!(search_level, chosen, "reordering search tree");
            self.nodes.swap(search_level, chosen);
            self.nodes[search_level].set_level(search_level);
            self.nodes[chosen].set_level(chosen);
            let near = self.nodes[search_level].variable();
            let far = self.nodes[chosen].variable();
            self.positions[near] = search_level;
            self.positions[far] = chosen;
        }
    }

    /// A read-only view for ordering strategies.
    pub fn view<'a, C: BinaryCsp>(&'a self, csp: &'a C) -> TreeView<'a, C> {
        TreeView {
            nodes: &self.nodes,
            csp,
        }
    }

    /// Assignments for every node currently holding a committed value, in
    /// level order, resolved back to caller-level values.
    pub fn assignments<C: BinaryCsp>(&self, csp: &C) -> Vec<Assignment<C::Value>> {
        self.nodes
            .iter()
            .filter_map(|node| {
                node.value().map(|index| Assignment {
                    variable: node.variable(),
                    value: csp.value(node.variable(), index),
                })
            })
            .collect()
    }
}

/// The narrow read capability handed to ordering strategies: indexable node
/// access plus adjacency and tightness lookups, nothing that mutates.
pub struct TreeView<'a, C: BinaryCsp> {
    nodes: &'a [SearchNode],
    csp: &'a C,
}

impl<'a, C: BinaryCsp> TreeView<'a, C> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, level: usize) -> &SearchNode {
        &self.nodes[level]
    }

    /// Whether the variables at the two levels are adjacent in the
    /// constraint graph.
    pub fn adjacent(&self, a: usize, b: usize) -> bool {
        self.csp
            .adjacent(self.nodes[a].variable(), self.nodes[b].variable())
    }

    pub fn sum_tightness(&self, level: usize) -> f64 {
        self.nodes[level].sum_tightness(self.csp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::n_queens::NQueensProblem;
    use crate::solver::heuristics::ordering::NaturalOrdering;

    #[test]
    fn populate_assigns_natural_levels() {
        let csp = NQueensProblem::new(4);
        let mut tree = SearchTree::with_capacity(4);
        tree.populate(&csp);

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.leaf_level(), 4);
        for level in 0..4 {
            assert_eq!(tree.node(level).variable(), level);
            assert_eq!(tree.node(level).level(), level);
            assert_eq!(tree.level_of(level), level);
        }
    }

    #[test]
    fn reorder_with_natural_ordering_is_identity() {
        let csp = NQueensProblem::new(4);
        let mut tree = SearchTree::with_capacity(4);
        tree.populate(&csp);
        tree.reorder(0, &csp, &NaturalOrdering);
        assert_eq!(tree.node(0).variable(), 0);
    }

    #[test]
    fn swapping_nodes_updates_levels_and_positions() {
        struct SwapLast;
        impl<C: BinaryCsp> OrderingStrategy<C> for SwapLast {
            fn swap_level(&self, view: &TreeView<'_, C>, _search_level: usize) -> usize {
                view.len() - 1
            }
        }

        let csp = NQueensProblem::new(4);
        let mut tree = SearchTree::with_capacity(4);
        tree.populate(&csp);
        tree.reorder(0, &csp, &SwapLast);

        assert_eq!(tree.node(0).variable(), 3);
        assert_eq!(tree.node(3).variable(), 0);
        assert_eq!(tree.level_of(3), 0);
        assert_eq!(tree.level_of(0), 3);
    }

    #[test]
    fn reset_empties_the_tree() {
        let csp = NQueensProblem::new(4);
        let mut tree = SearchTree::with_capacity(4);
        tree.populate(&csp);
        tree.reset();
        assert!(tree.is_empty());
    }
}
