//! Duplicate detection.
//!
//! The explored set decides whether a freshly generated child is novel.
//!
//! By default an [`ArtifactSet`] records a key when a node first enters the
//! frontier (the root through `note_initial`, children through
//! `should_add_to_frontier`), so the set always agrees with the frontier about
//! what has already been generated and every key is expanded at most once.
//! First-generated wins: a later, cheaper path to a recorded key is discarded.
//!
//! With [`RecordAt::Expansion`] the key is recorded only when a node is
//! expanded. Children are rejected only if their key is already closed, so
//! the frontier may hold several paths to one key and a cost-ordered search
//! pops the cheapest first. Later copies of a closed key are turned away by
//! `note_explored` when they are popped, so each key is still expanded at
//! most once. This is the mode that keeps A* optimal on graphs with
//! converging paths of unequal cost.

use std::hash::Hash;
use std::rc::Rc;

use hashbrown::HashSet;

use crate::fingerprint::{Fingerprint, DOMAIN_STATE_ARTIFACT};
use crate::node::Node;

/// Duplicate-avoidance contract used by the control loop.
pub trait ExploredSet<S> {
    /// Called once, for the root, before it is added to the frontier.
    fn note_initial(&mut self, node: &Node<S>);

    /// Called for a popped node that failed the goal test. Returns `true` if
    /// the node should be expanded, `false` if its key is already closed; the
    /// loop then discards it unexpanded.
    fn note_explored(&mut self, node: &Node<S>) -> bool;

    /// Called for every generated child. Returns `true` if the child is novel
    /// and records it; returns `false` for a duplicate.
    fn should_add_to_frontier(&mut self, node: &Node<S>) -> bool;

    /// An empty set with the same configuration.
    #[must_use]
    fn fresh(&self) -> Self
    where
        Self: Sized;
}

/// Tracks nothing; every child is added.
///
/// Only sound for tree-shaped spaces or when revisiting is acceptable. On a
/// space with cycles a search using it may not terminate.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTracking;

impl<S> ExploredSet<S> for NoTracking {
    fn note_initial(&mut self, _node: &Node<S>) {}

    fn note_explored(&mut self, _node: &Node<S>) -> bool {
        true
    }

    fn should_add_to_frontier(&mut self, _node: &Node<S>) -> bool {
        true
    }

    fn fresh(&self) -> Self {
        Self
    }
}

/// Function deriving a dedup key from a node.
pub type ArtifactFn<S, A> = Rc<dyn Fn(&Node<S>) -> A>;

/// When an [`ArtifactSet`] records a node's key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordAt {
    /// On entering the frontier. Each key is expanded at most once.
    #[default]
    Generation,
    /// On expansion. Each key is added until it has been expanded once.
    Expansion,
}

/// Tracks a hashable artifact derived from each node.
pub struct ArtifactSet<S, A> {
    artifact: ArtifactFn<S, A>,
    seen: HashSet<A>,
    record_at: RecordAt,
}

impl<S, A: Hash + Eq> ArtifactSet<S, A> {
    /// Track the artifact `artifact` derives from each node.
    #[must_use]
    pub fn new(artifact: impl Fn(&Node<S>) -> A + 'static) -> Self {
        Self {
            artifact: Rc::new(artifact),
            seen: HashSet::new(),
            record_at: RecordAt::Generation,
        }
    }

    /// Switch when keys are recorded.
    #[must_use]
    pub fn recording_at(mut self, record_at: RecordAt) -> Self {
        self.record_at = record_at;
        self
    }

    /// When keys are recorded.
    #[must_use]
    pub fn record_at(&self) -> RecordAt {
        self.record_at
    }

    /// Number of distinct artifacts recorded.
    #[must_use]
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    fn record(&mut self, node: &Node<S>) -> bool {
        self.seen.insert((self.artifact)(node))
    }
}

impl<S: Clone + Hash + Eq + 'static> ArtifactSet<S, S> {
    /// Track the states themselves.
    #[must_use]
    pub fn by_state() -> Self {
        Self::new(|node: &Node<S>| node.state().clone())
    }
}

impl<S: 'static> ArtifactSet<S, Fingerprint> {
    /// Track SHA-256 fingerprints of each state's identity bytes.
    ///
    /// Use for states that are large or not `Hash`. `identity` must map equal
    /// states to equal bytes.
    #[must_use]
    pub fn fingerprinted(identity: impl Fn(&S) -> Vec<u8> + 'static) -> Self {
        Self::new(move |node: &Node<S>| {
            Fingerprint::of(DOMAIN_STATE_ARTIFACT, &identity(node.state()))
        })
    }
}

impl<S, A: Hash + Eq> ExploredSet<S> for ArtifactSet<S, A> {
    fn note_initial(&mut self, node: &Node<S>) {
        if self.record_at == RecordAt::Generation {
            self.record(node);
        }
    }

    fn note_explored(&mut self, node: &Node<S>) -> bool {
        match self.record_at {
            // Keys are unique in the frontier, recorded when added.
            RecordAt::Generation => {
                self.record(node);
                true
            }
            RecordAt::Expansion => self.record(node),
        }
    }

    fn should_add_to_frontier(&mut self, node: &Node<S>) -> bool {
        match self.record_at {
            RecordAt::Generation => self.record(node),
            RecordAt::Expansion => !self.seen.contains(&(self.artifact)(node)),
        }
    }

    fn fresh(&self) -> Self {
        Self {
            artifact: Rc::clone(&self.artifact),
            seen: HashSet::new(),
            record_at: self.record_at,
        }
    }
}

impl<S, A> std::fmt::Debug for ArtifactSet<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactSet")
            .field("seen", &self.seen.len())
            .field("record_at", &self.record_at)
            .finish_non_exhaustive()
    }
}
