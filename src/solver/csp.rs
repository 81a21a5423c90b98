//! The binary-CSP projection consumed by the solver.
//!
//! Domain-modelling code supplies an implementation of [`BinaryCsp`]: a
//! read-only view of the modelled problem in terms of dense variable indices,
//! per-variable domain sizes, adjacency, and a pairwise consistency
//! predicate. The solver never mutates the projection and never sees the
//! caller's value types except through [`BinaryCsp::value`].

use serde::{Deserialize, Serialize};

/// Dense variable index, `0..variable_count()`, assigned at model time and
/// stable for the lifetime of one solve.
pub type Variable = usize;

/// Dense domain-value index, `0..domain_size(v)` per variable.
pub type DomainValue = usize;

/// A caller-facing (variable, value) pair, produced by resolving the
/// solver's internal indices back through the projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment<V> {
    pub variable: Variable,
    pub value: V,
}

/// A read-only projection of a problem onto a binary CSP.
///
/// Implementations must stay immutable for the duration of a solve: the
/// variable count, domains, adjacency, and predicate may not change while a
/// solver holds the projection.
pub trait BinaryCsp {
    /// The caller-level value type that domain-value indices map back to.
    type Value: Clone + std::fmt::Debug + PartialEq + 'static;

    /// Number of variables in the modelled problem. A projection with zero
    /// variables is not currently modelling anything and is rejected by the
    /// solver.
    fn variable_count(&self) -> usize;

    /// Number of values in `variable`'s domain.
    fn domain_size(&self, variable: Variable) -> usize;

    /// Whether a binary constraint relates the two variables.
    fn adjacent(&self, a: Variable, b: Variable) -> bool;

    /// Whether the two tentative values satisfy the predicate between their
    /// variables. Must return `true` for non-adjacent pairs: the naive
    /// backtracking strategy tests every earlier node, adjacent or not.
    fn consistent(
        &self,
        a: Variable,
        value_a: DomainValue,
        b: Variable,
        value_b: DomainValue,
    ) -> bool;

    /// Number of variables adjacent to `variable`.
    fn degree(&self, variable: Variable) -> usize {
        (0..self.variable_count())
            .filter(|&other| other != variable && self.adjacent(variable, other))
            .count()
    }

    /// Sum, over all variables adjacent to `variable`, of the fraction of
    /// cross-domain value pairs that are mutually consistent. A static
    /// measure of constrainedness used by the max-tightness heuristic.
    fn sum_tightness(&self, variable: Variable) -> f64 {
        let mut sum = 0.0;
        for other in 0..self.variable_count() {
            if other == variable || !self.adjacent(variable, other) {
                continue;
            }
            let pairs = self.domain_size(variable) * self.domain_size(other);
            if pairs == 0 {
                continue;
            }
            let mut consistent_pairs = 0usize;
            for value_a in 0..self.domain_size(variable) {
                for value_b in 0..self.domain_size(other) {
                    if self.consistent(variable, value_a, other, value_b) {
                        consistent_pairs += 1;
                    }
                }
            }
            sum += consistent_pairs as f64 / pairs as f64;
        }
        sum
    }

    /// Resolves a (variable, domain-value index) pair back to the
    /// caller-level value.
    fn value(&self, variable: Variable, index: DomainValue) -> Self::Value;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two variables, domains {0, 1}, required to differ.
    #[derive(Debug)]
    struct NotEqualPair;

    impl BinaryCsp for NotEqualPair {
        type Value = usize;

        fn variable_count(&self) -> usize {
            2
        }
        fn domain_size(&self, _variable: Variable) -> usize {
            2
        }
        fn adjacent(&self, a: Variable, b: Variable) -> bool {
            a != b
        }
        fn consistent(&self, a: Variable, va: DomainValue, b: Variable, vb: DomainValue) -> bool {
            a == b || va != vb
        }
        fn value(&self, _variable: Variable, index: DomainValue) -> usize {
            index
        }
    }

    #[test]
    fn default_degree_counts_adjacent_variables() {
        assert_eq!(NotEqualPair.degree(0), 1);
        assert_eq!(NotEqualPair.degree(1), 1);
    }

    #[test]
    fn default_sum_tightness_is_fraction_of_consistent_pairs() {
        // 2 of the 4 cross-domain pairs are consistent.
        let tightness = NotEqualPair.sum_tightness(0);
        assert!((tightness - 0.5).abs() < 1e-12);
    }
}
