pub mod cancellation;
pub mod csp;
pub mod engine;
pub mod heuristics;
pub mod node;
pub mod solution;
pub mod stats;
pub mod strategies;
pub mod tree;
pub mod verbose;
pub mod work_list;
