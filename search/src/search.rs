//! Graph-search control loop.
//!
//! ```text
//! root → frontier ─pop→ goal test ─accept→ Solution
//!            ↑             │ reject
//!            │             ↓
//!            └─ novel ── explored set ←─ expand
//! ```
//!
//! A searcher holds its frontier, explored set and goal checker as templates.
//! Every call to [`GraphSearcher::search`] derives fresh, empty instances from
//! them and moves those into the loop, so no state leaks between searches.

use std::marker::PhantomData;

use crate::contract::Expander;
use crate::error::SearchError;
use crate::explored::ExploredSet;
use crate::frontier::{Frontier, QueueFrontier};
use crate::goal::GoalChecker;
use crate::node::{Node, NodeKind, SearchTree};
use crate::observer::{NoopObserver, SearchObserver};
use crate::policy::SearchPolicy;

/// The three swappable policies of a search.
#[derive(Debug, Clone)]
pub struct SearchParts<F, X, G> {
    pub frontier: F,
    pub explored: X,
    pub goal: G,
}

impl<F, X, G> SearchParts<F, X, G> {
    /// Bundle the three parts.
    #[must_use]
    pub fn new(frontier: F, explored: X, goal: G) -> Self {
        Self {
            frontier,
            explored,
            goal,
        }
    }

    /// Fresh instances of all three parts for one search.
    #[must_use]
    pub fn fresh<S>(&self) -> Self
    where
        F: Frontier<S>,
        X: ExploredSet<S>,
        G: GoalChecker<S>,
    {
        Self {
            frontier: self.frontier.fresh(),
            explored: self.explored.fresh(),
            goal: self.goal.fresh(),
        }
    }
}

/// Counters of one completed search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchCounters {
    /// Nodes ever added to the frontier, root included.
    pub added: u64,
    /// Nodes turned away by the explored set: duplicate children, and popped
    /// nodes whose key was closed after they were added.
    pub rejected: u64,
    /// Nodes popped, failed the goal test, and expanded.
    pub expanded: u64,
    /// Nodes still open in the frontier at termination.
    pub unexpanded: u64,
}

/// A successful search: the accepted node and the tree its parent links
/// resolve against.
#[derive(Debug, Clone)]
pub struct Solution<S> {
    node: Node<S>,
    tree: SearchTree<S>,
}

impl<S> Solution<S> {
    /// The accepted node.
    #[must_use]
    pub fn node(&self) -> &Node<S> {
        &self.node
    }

    /// Consume the solution, dropping the tree.
    #[must_use]
    pub fn into_node(self) -> Node<S> {
        self.node
    }

    /// State of the accepted node.
    #[must_use]
    pub fn state(&self) -> &S {
        self.node.state()
    }

    /// Accumulated path cost, for cost-carrying node kinds.
    #[must_use]
    pub fn cost(&self) -> Option<f64> {
        self.node.cost()
    }

    /// Arena of expanded nodes the path resolves against.
    #[must_use]
    pub fn tree(&self) -> &SearchTree<S> {
        &self.tree
    }

    /// States from the initial state to the goal, inclusive.
    ///
    /// Only path-carrying node kinds record ancestors; for the others the
    /// path is the goal state alone.
    #[must_use]
    pub fn state_path(&self) -> Vec<&S> {
        self.tree.state_path(&self.node)
    }

    /// Number of states on the path, start and goal included.
    #[must_use]
    pub fn path_len(&self) -> usize {
        self.state_path().len()
    }

    /// Path rendered as `a -> b -> c`.
    #[must_use]
    pub fn path_to_string(&self) -> String
    where
        S: std::fmt::Debug,
    {
        self.tree.path_to_string(&self.node)
    }
}

/// Generic graph searcher over an expander and three swappable parts.
pub struct GraphSearcher<S, E, F, X, G> {
    expander: E,
    parts: SearchParts<F, X, G>,
    policy: SearchPolicy,
    last: Option<SearchCounters>,
    _state: PhantomData<fn() -> S>,
}

impl<S, E, F, X, G> GraphSearcher<S, E, F, X, G> {
    /// Searcher over `expander` with template `parts`.
    #[must_use]
    pub fn new(expander: E, parts: SearchParts<F, X, G>, policy: SearchPolicy) -> Self {
        Self {
            expander,
            parts,
            policy,
            last: None,
            _state: PhantomData,
        }
    }

    /// Configured policy.
    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// The searched space.
    #[must_use]
    pub fn expander(&self) -> &E {
        &self.expander
    }

    /// Counters of the most recent search; `None` before the first one.
    #[must_use]
    pub fn last_counters(&self) -> Option<SearchCounters> {
        self.last
    }

    /// Nodes added in the most recent search, root included.
    #[must_use]
    pub fn last_added(&self) -> Option<u64> {
        self.last.map(|c| c.added)
    }

    /// Nodes rejected in the most recent search.
    #[must_use]
    pub fn last_rejected(&self) -> Option<u64> {
        self.last.map(|c| c.rejected)
    }

    /// Nodes expanded in the most recent search.
    #[must_use]
    pub fn last_expanded(&self) -> Option<u64> {
        self.last.map(|c| c.expanded)
    }

    /// Nodes left open when the most recent search ended.
    #[must_use]
    pub fn last_unexpanded(&self) -> Option<u64> {
        self.last.map(|c| c.unexpanded)
    }
}

impl<S, E, X, G> GraphSearcher<S, E, QueueFrontier<S>, X, G> {
    /// Breadth-first search over path-carrying nodes.
    #[must_use]
    pub fn breadth_first(expander: E, explored: X, goal: G) -> Self {
        Self::new(
            expander,
            SearchParts::new(QueueFrontier::new(), explored, goal),
            SearchPolicy::new(NodeKind::Path),
        )
    }
}

impl<S, E, F, X, G> GraphSearcher<S, E, F, X, G>
where
    E: Expander<S>,
    F: Frontier<S>,
    X: ExploredSet<S>,
    G: GoalChecker<S>,
{
    /// Search from `initial`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::NoSolution`] if the frontier is exhausted and the goal
    ///   checker has no deferred result.
    /// - [`SearchError::InvalidPolicy`] if the policy fails pre-flight
    ///   validation.
    /// - [`SearchError::FrontierEmpty`] if the frontier breaks its contract.
    pub fn search(&mut self, initial: S) -> Result<Solution<S>, SearchError> {
        self.search_observed(initial, &mut NoopObserver)
    }

    /// Search from `initial`, reporting every step to `observer`.
    ///
    /// # Errors
    ///
    /// Same as [`GraphSearcher::search`].
    pub fn search_observed<O>(
        &mut self,
        initial: S,
        observer: &mut O,
    ) -> Result<Solution<S>, SearchError>
    where
        O: SearchObserver<S> + ?Sized,
    {
        self.policy
            .validate(Frontier::<S>::requires_cost(&self.parts.frontier))?;

        let span = tracing::debug_span!("graph_search", node_kind = self.policy.node_kind.as_str());
        let _entered = span.enter();

        let mut counters = SearchCounters::default();
        let outcome = graph_search(
            initial,
            &self.expander,
            self.parts.fresh::<S>(),
            self.policy.node_kind,
            observer,
            &mut counters,
        );
        self.last = Some(counters);

        tracing::debug!(
            found = outcome.is_ok(),
            added = counters.added,
            rejected = counters.rejected,
            expanded = counters.expanded,
            unexpanded = counters.unexpanded,
            "search finished"
        );
        outcome
    }

    /// Whether a goal is reachable from `initial`.
    ///
    /// # Errors
    ///
    /// Only [`SearchError::NoSolution`] is turned into `Ok(false)`; every other
    /// error propagates.
    pub fn solvable(&mut self, initial: S) -> Result<bool, SearchError> {
        match self.search(initial) {
            Ok(_) => Ok(true),
            Err(SearchError::NoSolution) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

impl<S, E, F, X, G> std::fmt::Debug for GraphSearcher<S, E, F, X, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphSearcher")
            .field("policy", &self.policy)
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

/// Run one search to completion with the given parts.
///
/// The parts must be fresh: nothing recorded by an earlier search may remain
/// in them. `counters` is filled in as the search runs and is complete
/// whatever the outcome.
///
/// # Errors
///
/// See [`GraphSearcher::search`]; no policy validation happens here.
pub fn graph_search<S, E, F, X, G, O>(
    initial: S,
    expander: &E,
    parts: SearchParts<F, X, G>,
    node_kind: NodeKind,
    observer: &mut O,
    counters: &mut SearchCounters,
) -> Result<Solution<S>, SearchError>
where
    E: Expander<S>,
    F: Frontier<S>,
    X: ExploredSet<S>,
    G: GoalChecker<S>,
    O: SearchObserver<S> + ?Sized,
{
    let SearchParts {
        mut frontier,
        mut explored,
        mut goal,
    } = parts;
    let mut tree = SearchTree::new();

    let root = Node::root(node_kind, initial);
    observer.on_initial(&root);
    explored.note_initial(&root);
    frontier.add(root);
    counters.added += 1;

    while !frontier.is_empty() {
        let node = match frontier.pop() {
            Ok(node) => node,
            Err(empty) => {
                counters.unexpanded = frontier.count_open() as u64;
                tracing::error!(
                    open = frontier.count_open(),
                    "frontier reported open nodes but pop failed"
                );
                return Err(empty.into());
            }
        };
        observer.on_pop(&node);

        if goal.test(&node) {
            counters.unexpanded = frontier.count_open() as u64;
            observer.on_goal(&node);
            return Ok(Solution { node, tree });
        }

        if !explored.note_explored(&node) {
            observer.on_reject(&node);
            counters.rejected += 1;
            continue;
        }
        observer.on_expand(&node);
        counters.expanded += 1;

        for child in expand_into_tree(node, &mut tree, expander) {
            if explored.should_add_to_frontier(&child) {
                observer.on_add(&child);
                frontier.add(child);
                counters.added += 1;
            } else {
                observer.on_reject(&child);
                counters.rejected += 1;
            }
        }
    }

    counters.unexpanded = frontier.count_open() as u64;
    observer.on_exhausted();
    let node = goal.get()?;
    observer.on_goal(&node);
    Ok(Solution { node, tree })
}

/// Expand `node`, first moving it into the tree if its children link to it.
fn expand_into_tree<S, E: Expander<S>>(
    node: Node<S>,
    tree: &mut SearchTree<S>,
    expander: &E,
) -> Vec<Node<S>> {
    if node.kind().has_path() {
        let id = tree.push(node);
        match tree.get(id) {
            Some(parent) => parent.expand(Some(id), expander).collect(),
            None => Vec::new(),
        }
    } else {
        node.expand(None, expander).collect()
    }
}
