//! Waypoint Harness: search worlds and reference solvers.
//!
//! Worlds implement [`waypoint_search::contract::Expander`] and are fixtures
//! for the lock tests and benchmarks, not product features. The reference
//! solver computes optimal costs without any of the engine's parts so that
//! search results can be checked against it.
//!
//! ```text
//! waypoint_search  ←  waypoint_harness  ←  lock-tests / benchmarks
//! (engine)            (worlds, oracle)
//! ```

#![forbid(unsafe_code)]

pub mod reference;
pub mod worlds;
