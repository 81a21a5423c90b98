//! Ready-made projections of classic problems, used by the tests and
//! benches and as modelling references.

pub mod map_colouring;
pub mod n_queens;
