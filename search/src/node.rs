//! Search nodes and the arena that holds expanded path-carrying nodes.
//!
//! A node wraps a state with the metadata its variant carries:
//!
//! | kind       | cost | parent |
//! |------------|------|--------|
//! | `Plain`    |      |        |
//! | `Cost`     |  x   |        |
//! | `Path`     |      |   x    |
//! | `CostPath` |  x   |   x    |
//!
//! Parent links are [`NodeId`] indices into a [`SearchTree`], never owning
//! pointers. A node enters the tree when it is expanded, so every parent
//! referenced by a live node is already in the tree. Nodes are immutable after
//! construction; children are built from a parent by [`Node::child`].

use std::cmp::Ordering;
use std::fmt;

use crate::contract::{Expander, Successor};

/// Which metadata a node carries. Children inherit their parent's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// State only.
    Plain,
    /// State and accumulated path cost.
    Cost,
    /// State and parent link.
    Path,
    /// State, accumulated cost and parent link.
    CostPath,
}

impl NodeKind {
    /// Whether nodes of this kind accumulate edge costs.
    #[must_use]
    pub fn has_cost(self) -> bool {
        matches!(self, Self::Cost | Self::CostPath)
    }

    /// Whether nodes of this kind link to their parent.
    #[must_use]
    pub fn has_path(self) -> bool {
        matches!(self, Self::Path | Self::CostPath)
    }

    /// Stable lowercase name, used in logs and traces.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Cost => "cost",
            Self::Path => "path",
            Self::CostPath => "cost_path",
        }
    }
}

/// Index of an expanded node in a [`SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A vertex of the search tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<S> {
    Plain {
        state: S,
    },
    Cost {
        state: S,
        cost: f64,
    },
    Path {
        state: S,
        parent: Option<NodeId>,
    },
    CostPath {
        state: S,
        cost: f64,
        parent: Option<NodeId>,
    },
}

impl<S> Node<S> {
    /// Build a root node of the given kind: zero cost, no parent.
    #[must_use]
    pub fn root(kind: NodeKind, state: S) -> Self {
        match kind {
            NodeKind::Plain => Self::Plain { state },
            NodeKind::Cost => Self::Cost { state, cost: 0.0 },
            NodeKind::Path => Self::Path {
                state,
                parent: None,
            },
            NodeKind::CostPath => Self::CostPath {
                state,
                cost: 0.0,
                parent: None,
            },
        }
    }

    /// The wrapped state.
    #[must_use]
    pub fn state(&self) -> &S {
        match self {
            Self::Plain { state }
            | Self::Cost { state, .. }
            | Self::Path { state, .. }
            | Self::CostPath { state, .. } => state,
        }
    }

    /// Consume the node, keeping only its state.
    #[must_use]
    pub fn into_state(self) -> S {
        match self {
            Self::Plain { state }
            | Self::Cost { state, .. }
            | Self::Path { state, .. }
            | Self::CostPath { state, .. } => state,
        }
    }

    /// Which variant this node is.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Plain { .. } => NodeKind::Plain,
            Self::Cost { .. } => NodeKind::Cost,
            Self::Path { .. } => NodeKind::Path,
            Self::CostPath { .. } => NodeKind::CostPath,
        }
    }

    /// Accumulated path cost, if this kind carries one.
    #[must_use]
    pub fn cost(&self) -> Option<f64> {
        match self {
            Self::Cost { cost, .. } | Self::CostPath { cost, .. } => Some(*cost),
            Self::Plain { .. } | Self::Path { .. } => None,
        }
    }

    /// Parent link, if this kind carries one and the node is not a root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Self::Path { parent, .. } | Self::CostPath { parent, .. } => *parent,
            Self::Plain { .. } | Self::Cost { .. } => None,
        }
    }

    /// Build the child reached through `successor`.
    ///
    /// `link` is this node's id in the search tree; it becomes the child's
    /// parent for path-carrying kinds and is ignored otherwise.
    #[must_use]
    pub fn child(&self, link: Option<NodeId>, successor: Successor<S>) -> Self {
        let Successor { state, edge_cost } = successor;
        debug_assert!(
            edge_cost >= 0.0,
            "edge costs must be non-negative, got {edge_cost}"
        );
        match self {
            Self::Plain { .. } => Self::Plain { state },
            Self::Cost { cost, .. } => Self::Cost {
                state,
                cost: cost + edge_cost,
            },
            Self::Path { .. } => Self::Path {
                state,
                parent: link,
            },
            Self::CostPath { cost, .. } => Self::CostPath {
                state,
                cost: cost + edge_cost,
                parent: link,
            },
        }
    }

    /// Lazily expand this node into its children, one per successor.
    pub fn expand<'a, E>(
        &'a self,
        link: Option<NodeId>,
        expander: &'a E,
    ) -> impl Iterator<Item = Node<S>> + 'a
    where
        E: Expander<S>,
        S: 'a,
    {
        expander
            .successors(self.state())
            .map(move |successor| self.child(link, successor))
    }

    /// State-free description of this node for diagnostics.
    #[must_use]
    pub fn summary(&self) -> NodeSummary {
        NodeSummary {
            kind: self.kind(),
            cost: self.cost(),
            parent: self.parent(),
        }
    }
}

/// The metadata part of a node, without its state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSummary {
    pub kind: NodeKind,
    pub cost: Option<f64>,
    pub parent: Option<NodeId>,
}

impl fmt::Display for NodeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.as_str())?;
        if let Some(cost) = self.cost {
            write!(f, " cost={cost}")?;
        }
        if self.kind.has_path() {
            match self.parent {
                Some(parent) => write!(f, " parent={parent}")?,
                None => write!(f, " root")?,
            }
        }
        Ok(())
    }
}

/// A path cost with a total order, for use as a frontier key.
///
/// Ordering follows `f64::total_cmp`, so NaN sorts after every finite cost.
#[derive(Debug, Clone, Copy)]
pub struct OrderedCost(pub f64);

impl OrderedCost {
    /// The raw cost.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for OrderedCost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderedCost {}

impl PartialOrd for OrderedCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedCost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for OrderedCost {
    fn from(cost: f64) -> Self {
        Self(cost)
    }
}

/// Arena of expanded path-carrying nodes.
///
/// Owned by one search; parent links of every node produced by that search
/// resolve against it.
#[derive(Debug, Clone)]
pub struct SearchTree<S> {
    nodes: Vec<Node<S>>,
}

impl<S> SearchTree<S> {
    /// An empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Append a node and return its id.
    pub fn push(&mut self, node: Node<S>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// The node stored under `id`, if any.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node<S>> {
        self.nodes.get(id.0)
    }

    /// Number of nodes stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing has been expanded into the arena.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// States from the root to `node`, inclusive.
    ///
    /// For kinds without parent links the path is `node`'s state alone. A
    /// dangling link (an id from another tree) ends the walk.
    #[must_use]
    pub fn state_path<'a>(&'a self, node: &'a Node<S>) -> Vec<&'a S> {
        let mut path = vec![node.state()];
        let mut next = node.parent();
        while let Some(id) = next {
            let Some(ancestor) = self.get(id) else {
                break;
            };
            path.push(ancestor.state());
            next = ancestor.parent();
        }
        path.reverse();
        path
    }

    /// Render the path to `node` as `a -> b -> c` using `Debug` formatting.
    #[must_use]
    pub fn path_to_string(&self, node: &Node<S>) -> String
    where
        S: fmt::Debug,
    {
        self.state_path(node)
            .iter()
            .map(|state| format!("{state:?}"))
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

impl<S> Default for SearchTree<S> {
    fn default() -> Self {
        Self::new()
    }
}
