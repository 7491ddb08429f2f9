//! Search worlds used by tests and benchmarks.

pub mod grid;
pub mod weighted_graph;
