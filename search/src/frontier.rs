//! Open-set containers.
//!
//! A frontier holds every node that has been generated but neither expanded
//! nor discarded, and decides which one comes out next.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt::Write as _;
use std::rc::Rc;

use crate::node::Node;

/// `pop` was called on an empty frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierEmpty;

impl std::fmt::Display for FrontierEmpty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pop from an empty frontier")
    }
}

impl std::error::Error for FrontierEmpty {}

/// Open-set contract used by the control loop.
pub trait Frontier<S> {
    /// Insert a freshly generated node.
    fn add(&mut self, node: Node<S>);

    /// Remove the next node in policy order.
    ///
    /// # Errors
    ///
    /// Returns [`FrontierEmpty`] if there is nothing to pop. Callers check
    /// [`Frontier::is_empty`] first, so this is an invariant violation.
    fn pop(&mut self) -> Result<Node<S>, FrontierEmpty>;

    /// Whether no nodes are open.
    fn is_empty(&self) -> bool;

    /// Number of nodes currently open.
    fn count_open(&self) -> usize;

    /// Whether the removal order reads node costs. Checked against the
    /// node kind before a search starts.
    fn requires_cost(&self) -> bool {
        false
    }

    /// One-line-per-node diagnostic dump. No effect on behavior.
    fn debug_display(&self) -> String;

    /// An empty frontier with the same ordering configuration.
    #[must_use]
    fn fresh(&self) -> Self
    where
        Self: Sized;
}

/// FIFO frontier: breadth-first order.
#[derive(Debug, Clone)]
pub struct QueueFrontier<S> {
    queue: VecDeque<Node<S>>,
    high_water: usize,
}

impl<S> QueueFrontier<S> {
    /// An empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            high_water: 0,
        }
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

impl<S> Default for QueueFrontier<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Frontier<S> for QueueFrontier<S> {
    fn add(&mut self, node: Node<S>) {
        self.queue.push_back(node);
        self.high_water = self.high_water.max(self.queue.len());
    }

    fn pop(&mut self) -> Result<Node<S>, FrontierEmpty> {
        self.queue.pop_front().ok_or(FrontierEmpty)
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn count_open(&self) -> usize {
        self.queue.len()
    }

    fn debug_display(&self) -> String {
        let mut out = format!(
            "queue frontier: open={} high_water={}",
            self.queue.len(),
            self.high_water
        );
        for (position, node) in self.queue.iter().enumerate() {
            let _ = write!(out, "\n  [{position}] {}", node.summary());
        }
        out
    }

    fn fresh(&self) -> Self {
        Self::new()
    }
}

/// A frontier entry wrapping a node with its ordering key.
///
/// `BinaryHeap` is a max-heap, so the key is wrapped in `Reverse` to pop the
/// smallest `(key, sequence)` first.
struct PriorityEntry<S, K> {
    key: Reverse<(K, u64)>,
    node: Node<S>,
}

impl<S, K: Ord> PartialEq for PriorityEntry<S, K> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<S, K: Ord> Eq for PriorityEntry<S, K> {}

impl<S, K: Ord> PartialOrd for PriorityEntry<S, K> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<S, K: Ord> Ord for PriorityEntry<S, K> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Function computing a node's ordering key.
pub type PriorityFn<S, K> = Rc<dyn Fn(&Node<S>) -> K>;

/// Priority frontier: pops the node with the smallest key first.
///
/// The key is computed once, when the node is added. Nodes with equal keys
/// pop in insertion order.
///
/// Orders usually written as a comparator are expressed as a key type with
/// a hand-written `Ord`: return a newtype from `priority` whose `cmp` is the
/// comparator. Any total order can be expressed this way.
pub struct PriorityFrontier<S, K> {
    heap: BinaryHeap<PriorityEntry<S, K>>,
    priority: PriorityFn<S, K>,
    next_sequence: u64,
    high_water: usize,
    requires_cost: bool,
}

impl<S, K: Ord> PriorityFrontier<S, K> {
    /// Create an empty frontier ordered by `priority`.
    #[must_use]
    pub fn new(priority: impl Fn(&Node<S>) -> K + 'static) -> Self {
        Self::from_priority_fn(Rc::new(priority), false)
    }

    /// Create an empty frontier whose `priority` reads node costs.
    ///
    /// A search using it rejects node kinds that carry no cost.
    #[must_use]
    pub fn cost_ordered(priority: impl Fn(&Node<S>) -> K + 'static) -> Self {
        Self::from_priority_fn(Rc::new(priority), true)
    }

    fn from_priority_fn(priority: PriorityFn<S, K>, requires_cost: bool) -> Self {
        Self {
            heap: BinaryHeap::new(),
            priority,
            next_sequence: 0,
            high_water: 0,
            requires_cost,
        }
    }

    /// Key of the node that would pop next.
    #[must_use]
    pub fn peek_key(&self) -> Option<&K> {
        self.heap.peek().map(|entry| &entry.key.0 .0)
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

impl<S, K: Ord + std::fmt::Debug> Frontier<S> for PriorityFrontier<S, K> {
    fn add(&mut self, node: Node<S>) {
        let key = (self.priority)(&node);
        self.heap.push(PriorityEntry {
            key: Reverse((key, self.next_sequence)),
            node,
        });
        self.next_sequence += 1;
        self.high_water = self.high_water.max(self.heap.len());
    }

    fn pop(&mut self) -> Result<Node<S>, FrontierEmpty> {
        self.heap.pop().map(|entry| entry.node).ok_or(FrontierEmpty)
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn count_open(&self) -> usize {
        self.heap.len()
    }

    fn requires_cost(&self) -> bool {
        self.requires_cost
    }

    fn debug_display(&self) -> String {
        let mut entries: Vec<&PriorityEntry<S, K>> = self.heap.iter().collect();
        // Max-heap over Reverse keys: descending entry order is pop order.
        entries.sort_by(|a, b| b.cmp(a));
        let mut out = format!(
            "priority frontier: open={} high_water={}",
            self.heap.len(),
            self.high_water
        );
        for entry in entries {
            let (key, sequence) = &entry.key.0;
            let _ = write!(
                out,
                "\n  key={key:?} seq={sequence} {}",
                entry.node.summary()
            );
        }
        out
    }

    fn fresh(&self) -> Self {
        Self::from_priority_fn(Rc::clone(&self.priority), self.requires_cost)
    }
}

impl<S, K> std::fmt::Debug for PriorityFrontier<S, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityFrontier")
            .field("open", &self.heap.len())
            .field("high_water", &self.high_water)
            .field("requires_cost", &self.requires_cost)
            .finish_non_exhaustive()
    }
}
