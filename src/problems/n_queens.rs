//! N-queens: one queen per column, domain values are row indices.

use crate::solver::csp::{BinaryCsp, DomainValue, Variable};

/// Every pair of columns is mutually constrained, making this a useful
/// dense-graph workout for the checking strategies.
#[derive(Debug, Clone, Copy)]
pub struct NQueensProblem {
    size: usize,
}

impl NQueensProblem {
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl BinaryCsp for NQueensProblem {
    type Value = usize;

    fn variable_count(&self) -> usize {
        self.size
    }

    fn domain_size(&self, _variable: Variable) -> usize {
        self.size
    }

    fn adjacent(&self, a: Variable, b: Variable) -> bool {
        a != b
    }

    fn consistent(&self, a: Variable, va: DomainValue, b: Variable, vb: DomainValue) -> bool {
        if a == b {
            return true;
        }
        va != vb && a.abs_diff(b) != va.abs_diff(vb)
    }

    fn value(&self, _variable: Variable, index: DomainValue) -> usize {
        index
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::cancellation::CancellationToken;
    use crate::solver::engine::SolverBuilder;
    use crate::solver::heuristics::OrderingStrategySelector;
    use crate::solver::strategies::CheckingStrategySelector;

    fn rows_of(result: &crate::solver::solution::SolveResult<usize>, size: usize) -> Vec<usize> {
        let mut rows = vec![0usize; size];
        for assignment in &result.assignments {
            rows[assignment.variable] = assignment.value;
        }
        rows
    }

    fn is_valid_placement(rows: &[usize]) -> bool {
        (0..rows.len()).all(|a| {
            (a + 1..rows.len()).all(|b| {
                rows[a] != rows[b] && a.abs_diff(b) != rows[a].abs_diff(rows[b])
            })
        })
    }

    #[test]
    fn queens_on_the_same_diagonal_are_inconsistent() {
        let csp = NQueensProblem::new(4);
        assert!(!csp.consistent(0, 0, 1, 1));
        assert!(!csp.consistent(0, 3, 2, 1));
        assert!(csp.consistent(0, 0, 1, 2));
    }

    #[test]
    fn four_queens_has_a_valid_placement_under_every_configuration() {
        let csp = NQueensProblem::new(4);
        let token = CancellationToken::new();
        for checking in CheckingStrategySelector::ALL {
            for ordering in [
                OrderingStrategySelector::NaturalOrdering,
                OrderingStrategySelector::BrelazHeuristic,
                OrderingStrategySelector::MaxCardinality,
                OrderingStrategySelector::MaxTightness,
            ] {
                let mut solver = SolverBuilder::new()
                    .capacity(4)
                    .checking(checking)
                    .ordering(ordering)
                    .build::<NQueensProblem>();
                let result = solver.solve(&csp, &token).unwrap();
                assert!(
                    result.is_solved(),
                    "{checking} with {ordering} missed the 4-queens solutions"
                );
                assert_eq!(result.assignments.len(), 4);
                assert!(is_valid_placement(&rows_of(&result, 4)));
            }
        }
    }

    #[test]
    fn three_queens_is_exhausted_by_every_strategy() {
        let csp = NQueensProblem::new(3);
        let token = CancellationToken::new();
        for checking in CheckingStrategySelector::ALL {
            let mut solver = SolverBuilder::new()
                .capacity(3)
                .checking(checking)
                .build::<NQueensProblem>();
            let result = solver.solve(&csp, &token).unwrap();
            assert!(!result.is_solved(), "{checking} invented a 3-queens solution");
        }
    }
}
