//! Waypoint Search: a generic, pluggable graph-search engine.
//!
//! A search is assembled from a state space and three swappable parts:
//!
//! ```text
//! Expander ──successors──┐
//!                        ↓
//! Frontier ⇄ GraphSearcher ⇄ ExploredSet
//!                        ↓
//!                  GoalChecker ──→ Solution | SearchError
//! ```
//!
//! # Key types
//!
//! - [`node::Node`]: a state plus optional cost and parent link
//! - [`node::SearchTree`]: arena the parent links resolve against
//! - [`frontier::Frontier`]: FIFO queue or priority-queue open set
//! - [`explored::ExploredSet`]: duplicate detection by derived artifact
//! - [`goal::GoalChecker`]: per-node acceptance and deferred results
//! - [`search::GraphSearcher`]: the control loop and its counters
//! - [`astar::AStar`]: `f = g + h` ordering over cost+path nodes
//! - [`trace::SearchTrace`]: deterministic, hashable event log of a search

#![forbid(unsafe_code)]

pub mod astar;
pub mod contract;
pub mod error;
pub mod explored;
pub mod fingerprint;
pub mod frontier;
pub mod goal;
pub mod node;
pub mod observer;
pub mod policy;
pub mod search;
pub mod trace;
