//! Ordering strategies: heuristics that pick which not-yet-assigned node
//! should occupy the current search level next.

pub mod ordering;

use serde::{Deserialize, Serialize};

use crate::solver::csp::BinaryCsp;
use ordering::{
    BrelazHeuristic, MaxCardinality, MaxTightness, NaturalOrdering, OrderingStrategy,
};

/// Selects one of the four ordering heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderingStrategySelector {
    NaturalOrdering,
    BrelazHeuristic,
    MaxCardinality,
    MaxTightness,
}

impl std::fmt::Display for OrderingStrategySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderingStrategySelector::NaturalOrdering => "natural ordering",
            OrderingStrategySelector::BrelazHeuristic => "Brelaz heuristic",
            OrderingStrategySelector::MaxCardinality => "max cardinality",
            OrderingStrategySelector::MaxTightness => "max tightness",
        };
        f.write_str(name)
    }
}

/// Constructs the ordering strategy for a selector.
pub fn build_ordering_strategy<C: BinaryCsp>(
    selector: OrderingStrategySelector,
) -> Box<dyn OrderingStrategy<C>> {
    match selector {
        OrderingStrategySelector::NaturalOrdering => Box::new(NaturalOrdering),
        OrderingStrategySelector::BrelazHeuristic => Box::new(BrelazHeuristic),
        OrderingStrategySelector::MaxCardinality => Box::new(MaxCardinality),
        OrderingStrategySelector::MaxTightness => Box::new(MaxTightness),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::n_queens::NQueensProblem;
    use crate::solver::tree::SearchTree;

    #[test]
    fn every_selector_builds_a_strategy() {
        let csp = NQueensProblem::new(4);
        let mut tree = SearchTree::with_capacity(4);
        tree.populate(&csp);
        for selector in [
            OrderingStrategySelector::NaturalOrdering,
            OrderingStrategySelector::BrelazHeuristic,
            OrderingStrategySelector::MaxCardinality,
            OrderingStrategySelector::MaxTightness,
        ] {
            let strategy = build_ordering_strategy::<NQueensProblem>(selector);
            let level = strategy.swap_level(&tree.view(&csp), 0);
            assert!(level < 4);
        }
    }
}
