//! Priority-queue searchers and the A* specialization.
//!
//! A* orders the frontier by `f = g + h`: the accumulated path cost of a node
//! plus a heuristic estimate of the remaining cost to a goal. With an
//! admissible heuristic (never overestimates) and non-negative edge costs, the
//! first goal popped is a cheapest one, provided duplicates are not pruned.
//!
//! The default A* searcher therefore tracks nothing. A tracked variant is
//! available for spaces with cycles. Nothing is ever re-opened: with an
//! [`ArtifactSet`](crate::explored::ArtifactSet) recording at generation the
//! first path generated to a state wins, which can be suboptimal when paths
//! of unequal cost converge. Recording at
//! [`Expansion`](crate::explored::RecordAt::Expansion) with a consistent
//! heuristic keeps the result optimal.

use std::rc::Rc;

use crate::explored::NoTracking;
use crate::frontier::PriorityFrontier;
use crate::node::{Node, NodeKind, OrderedCost};
use crate::policy::SearchPolicy;
use crate::search::{GraphSearcher, SearchParts};

/// Graph searcher over a [`PriorityFrontier`] keyed by `K`.
pub type PriorityQueueSearcher<S, E, K, X, G> = GraphSearcher<S, E, PriorityFrontier<S, K>, X, G>;

/// Priority-queue searcher keyed by `f = g + h`.
pub type AStarSearcher<S, E, X, G> = PriorityQueueSearcher<S, E, OrderedCost, X, G>;

/// Heuristic estimate of the remaining cost from a node to a goal.
pub type HeuristicFn<S> = Rc<dyn Fn(&Node<S>) -> f64>;

impl<S, E, K: Ord, X, G> GraphSearcher<S, E, PriorityFrontier<S, K>, X, G> {
    /// Best-first search popping the smallest `priority` key first.
    ///
    /// `priority` is evaluated once per node, when it is added.
    #[must_use]
    pub fn best_first(
        expander: E,
        priority: impl Fn(&Node<S>) -> K + 'static,
        explored: X,
        goal: G,
        policy: SearchPolicy,
    ) -> Self {
        Self::new(
            expander,
            SearchParts::new(PriorityFrontier::new(priority), explored, goal),
            policy,
        )
    }
}

/// Builder for A* searchers sharing one heuristic.
///
/// # Heuristic obligations
///
/// - Non-negative, and zero at every goal.
/// - Admissible: never more than the true remaining cost. Without this the
///   first goal popped may not be the cheapest.
/// - Consistent (`h(n) <= c(n, n') + h(n')`) when used with an explored set
///   recording at expansion.
///
/// None of these are checked.
pub struct AStar<S> {
    heuristic: HeuristicFn<S>,
    node_kind: NodeKind,
}

impl<S: 'static> AStar<S> {
    /// A* over cost+path nodes with a heuristic over nodes.
    #[must_use]
    pub fn new(heuristic: impl Fn(&Node<S>) -> f64 + 'static) -> Self {
        Self {
            heuristic: Rc::new(heuristic),
            node_kind: NodeKind::CostPath,
        }
    }

    /// A* with a heuristic that only looks at the state.
    #[must_use]
    pub fn from_state_heuristic(heuristic: impl Fn(&S) -> f64 + 'static) -> Self {
        Self::new(move |node: &Node<S>| heuristic(node.state()))
    }

    /// Dijkstra's algorithm: A* with `h = 0`.
    #[must_use]
    pub fn uniform_cost() -> Self {
        Self::new(|_: &Node<S>| 0.0)
    }

    /// Use cost-only nodes. Cheaper per node; solutions carry no path.
    #[must_use]
    pub fn without_paths(mut self) -> Self {
        self.node_kind = NodeKind::Cost;
        self
    }

    /// Policy for searchers built from this configuration.
    #[must_use]
    pub fn policy(&self) -> SearchPolicy {
        SearchPolicy::new(self.node_kind)
    }

    /// `f = g + h` for `node`.
    #[must_use]
    pub fn f_cost(&self, node: &Node<S>) -> OrderedCost {
        f_cost(node, self.heuristic.as_ref())
    }

    /// An empty frontier ordered by `f`.
    #[must_use]
    pub fn frontier(&self) -> PriorityFrontier<S, OrderedCost> {
        let heuristic = Rc::clone(&self.heuristic);
        PriorityFrontier::cost_ordered(move |node: &Node<S>| f_cost(node, heuristic.as_ref()))
    }

    /// Untracked A* searcher: optimal under an admissible heuristic.
    #[must_use]
    pub fn searcher<E, G>(&self, expander: E, goal: G) -> AStarSearcher<S, E, NoTracking, G> {
        self.tracked_searcher(expander, NoTracking, goal)
    }

    /// A* searcher with duplicate pruning by `explored`.
    #[must_use]
    pub fn tracked_searcher<E, X, G>(
        &self,
        expander: E,
        explored: X,
        goal: G,
    ) -> AStarSearcher<S, E, X, G> {
        GraphSearcher::new(
            expander,
            SearchParts::new(self.frontier(), explored, goal),
            self.policy(),
        )
    }
}

impl<S> Clone for AStar<S> {
    fn clone(&self) -> Self {
        Self {
            heuristic: Rc::clone(&self.heuristic),
            node_kind: self.node_kind,
        }
    }
}

impl<S> std::fmt::Debug for AStar<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AStar")
            .field("node_kind", &self.node_kind)
            .finish_non_exhaustive()
    }
}

/// `g + h`, where `g` is the node's accumulated cost (zero if it has none).
fn f_cost<S>(node: &Node<S>, heuristic: &dyn Fn(&Node<S>) -> f64) -> OrderedCost {
    OrderedCost(node.cost().unwrap_or(0.0) + heuristic(node))
}
