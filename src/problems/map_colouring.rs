//! Map colouring: regions sharing a border take different colours.

use serde::{Deserialize, Serialize};

use crate::solver::csp::{BinaryCsp, DomainValue, Variable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Colour {
    Red,
    Green,
    Blue,
    Yellow,
}

/// A colouring problem over a fixed region adjacency and a shared palette.
#[derive(Debug, Clone)]
pub struct MapColouringProblem {
    regions: usize,
    palette: Vec<Colour>,
    adjacency: Vec<bool>,
}

impl MapColouringProblem {
    /// Builds the problem from a border list; borders are symmetric and
    /// self-borders are ignored.
    pub fn new(regions: usize, palette: Vec<Colour>, borders: &[(usize, usize)]) -> Self {
        let mut adjacency = vec![false; regions * regions];
        for &(a, b) in borders {
            if a != b {
                adjacency[a * regions + b] = true;
                adjacency[b * regions + a] = true;
            }
        }
        Self {
            regions,
            palette,
            adjacency,
        }
    }
}

impl BinaryCsp for MapColouringProblem {
    type Value = Colour;

    fn variable_count(&self) -> usize {
        self.regions
    }

    fn domain_size(&self, _variable: Variable) -> usize {
        self.palette.len()
    }

    fn adjacent(&self, a: Variable, b: Variable) -> bool {
        self.adjacency[a * self.regions + b]
    }

    fn consistent(&self, a: Variable, va: DomainValue, b: Variable, vb: DomainValue) -> bool {
        !self.adjacent(a, b) || va != vb
    }

    fn value(&self, _variable: Variable, index: DomainValue) -> Colour {
        self.palette[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::cancellation::CancellationToken;
    use crate::solver::engine::SolverBuilder;
    use crate::solver::strategies::CheckingStrategySelector;

    /// Western Australia, Northern Territory, South Australia, Queensland.
    fn mainland_corner() -> MapColouringProblem {
        MapColouringProblem::new(
            4,
            vec![Colour::Red, Colour::Green, Colour::Blue],
            &[(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)],
        )
    }

    #[test]
    fn borders_are_symmetric() {
        let csp = mainland_corner();
        assert!(csp.adjacent(0, 1));
        assert!(csp.adjacent(1, 0));
        assert!(!csp.adjacent(0, 3));
        assert!(!csp.adjacent(0, 0));
    }

    #[test]
    fn every_strategy_three_colours_the_mainland_corner() {
        let _ = tracing_subscriber::fmt::try_init();
        let csp = mainland_corner();
        let token = CancellationToken::new();
        for selector in CheckingStrategySelector::ALL {
            let mut solver = SolverBuilder::new()
                .capacity(4)
                .checking(selector)
                .build::<MapColouringProblem>();
            let result = solver.solve(&csp, &token).unwrap();
            assert!(result.is_solved(), "{selector} failed to colour the map");
            for assignment in &result.assignments {
                for other in &result.assignments {
                    if csp.adjacent(assignment.variable, other.variable) {
                        assert_ne!(assignment.value, other.value);
                    }
                }
            }
        }
    }
}
