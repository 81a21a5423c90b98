//! Nodus is a generic binary constraint satisfaction problem (CSP) solving
//! engine built around interchangeable search algorithms.
//!
//! A problem is handed to the solver as a [`solver::csp::BinaryCsp`]
//! projection: dense variable indices, per-variable domain sizes, an
//! adjacency relation, and a pairwise consistency predicate. The solver
//! explores assignments over that projection with one of eight classical
//! checking strategies (from naive backtracking through maintaining arc
//! consistency) combined with one of four variable-ordering heuristics, and
//! reports the outcome together with deterministic step counts.
//!
//! # Core Concepts
//!
//! - **[`solver::csp::BinaryCsp`]**: the read-only projection you implement
//!   to describe your problem.
//! - **[`solver::strategies::CheckingStrategySelector`]**: picks the search
//!   algorithm; all eight share a common runtime cycle.
//! - **[`solver::heuristics::OrderingStrategySelector`]**: picks the
//!   dynamic variable ordering.
//! - **[`solver::engine::SolverBuilder`]**: assembles a reusable
//!   [`solver::engine::Solver`] or a step-by-step
//!   [`solver::verbose::VerboseSolver`].
//!
//! # Example: colouring a small map
//!
//! ```
//! use nodus::problems::map_colouring::{Colour, MapColouringProblem};
//! use nodus::solver::cancellation::CancellationToken;
//! use nodus::solver::engine::SolverBuilder;
//! use nodus::solver::heuristics::OrderingStrategySelector;
//! use nodus::solver::strategies::CheckingStrategySelector;
//!
//! let map = MapColouringProblem::new(
//!     4,
//!     vec![Colour::Red, Colour::Green, Colour::Blue],
//!     &[(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)],
//! );
//!
//! let mut solver = SolverBuilder::new()
//!     .capacity(4)
//!     .checking(CheckingStrategySelector::ForwardChecking)
//!     .ordering(OrderingStrategySelector::BrelazHeuristic)
//!     .build();
//!
//! let result = solver.solve(&map, &CancellationToken::new()).unwrap();
//! assert!(result.is_solved());
//! assert_eq!(result.assignments.len(), 4);
//! ```

pub mod error;
pub mod problems;
pub mod solver;
