//! `SearchTrace`: recorded event log of one search.
//!
//! The trace is an observer. It records every control-loop event in order,
//! with a state label and a node summary, and serializes to deterministic
//! JSON (sorted keys, compact separators). Two runs of the same search over
//! a deterministic space produce byte-identical traces.

use std::fmt::Debug;

use crate::fingerprint::{Fingerprint, DOMAIN_SEARCH_TRACE};
use crate::node::{Node, NodeSummary};
use crate::observer::SearchObserver;

/// Schema tag written into every serialized trace.
pub const TRACE_SCHEMA: &str = "waypoint.search_trace.v1";

/// Control-loop event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceEventKind {
    Initial,
    Pop,
    Expand,
    Add,
    Reject,
    Exhausted,
    Goal,
}

impl TraceEventKind {
    /// Lowercase name written into serialized traces.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Pop => "pop",
            Self::Expand => "expand",
            Self::Add => "add",
            Self::Reject => "reject",
            Self::Exhausted => "exhausted",
            Self::Goal => "goal",
        }
    }
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEvent {
    /// Position in the event log.
    pub order: u64,
    pub kind: TraceEventKind,
    /// Label of the node's state; `None` for `Exhausted`.
    pub state: Option<String>,
    /// Node metadata; `None` for `Exhausted`.
    pub node: Option<NodeSummary>,
}

/// Observer recording the full event log of a search.
pub struct SearchTrace<S> {
    label: Box<dyn Fn(&S) -> String>,
    events: Vec<TraceEvent>,
}

impl<S> SearchTrace<S> {
    /// Record states labelled by `label`.
    #[must_use]
    pub fn new(label: impl Fn(&S) -> String + 'static) -> Self {
        Self {
            label: Box::new(label),
            events: Vec::new(),
        }
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Number of events of `kind`.
    #[must_use]
    pub fn count(&self, kind: TraceEventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    /// Number of times a state with `label` was expanded.
    #[must_use]
    pub fn expansions_of(&self, label: &str) -> usize {
        self.events
            .iter()
            .filter(|e| e.kind == TraceEventKind::Expand && e.state.as_deref() == Some(label))
            .count()
    }

    /// Labels of expanded states, in expansion order.
    #[must_use]
    pub fn expansion_order(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter(|e| e.kind == TraceEventKind::Expand)
            .filter_map(|e| e.state.as_deref())
            .collect()
    }

    /// Drop all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn record(&mut self, kind: TraceEventKind, node: Option<&Node<S>>) {
        self.events.push(TraceEvent {
            order: self.events.len() as u64,
            kind,
            state: node.map(|n| (self.label)(n.state())),
            node: node.map(Node::summary),
        });
    }

    /// Convert to a `serde_json::Value` with sorted keys.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "counts": {
                "add": self.count(TraceEventKind::Add),
                "expand": self.count(TraceEventKind::Expand),
                "pop": self.count(TraceEventKind::Pop),
                "reject": self.count(TraceEventKind::Reject),
            },
            "events": self.events.iter().map(event_to_json).collect::<Vec<_>>(),
            "schema": TRACE_SCHEMA,
        })
    }

    /// Serialize the trace to compact JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.to_json_value())
    }

    /// Fingerprint of the serialized trace.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn digest(&self) -> Result<Fingerprint, serde_json::Error> {
        Ok(Fingerprint::of(DOMAIN_SEARCH_TRACE, &self.to_json_bytes()?))
    }
}

impl<S: Debug + 'static> SearchTrace<S> {
    /// Record states labelled by their `Debug` rendering.
    #[must_use]
    pub fn debug() -> Self {
        Self::new(|state: &S| format!("{state:?}"))
    }
}

impl<S> SearchObserver<S> for SearchTrace<S> {
    fn on_initial(&mut self, node: &Node<S>) {
        self.record(TraceEventKind::Initial, Some(node));
    }

    fn on_pop(&mut self, node: &Node<S>) {
        self.record(TraceEventKind::Pop, Some(node));
    }

    fn on_expand(&mut self, node: &Node<S>) {
        self.record(TraceEventKind::Expand, Some(node));
    }

    fn on_add(&mut self, node: &Node<S>) {
        self.record(TraceEventKind::Add, Some(node));
    }

    fn on_reject(&mut self, node: &Node<S>) {
        self.record(TraceEventKind::Reject, Some(node));
    }

    fn on_exhausted(&mut self) {
        self.record(TraceEventKind::Exhausted, None);
    }

    fn on_goal(&mut self, node: &Node<S>) {
        self.record(TraceEventKind::Goal, Some(node));
    }
}

impl<S> std::fmt::Debug for SearchTrace<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchTrace")
            .field("events", &self.events.len())
            .finish_non_exhaustive()
    }
}

fn event_to_json(e: &TraceEvent) -> serde_json::Value {
    let mut obj = serde_json::json!({
        "kind": e.kind.as_str(),
        "order": e.order,
        "state": e.state,
    });

    if let Some(node) = &e.node {
        obj["node"] = node_summary_to_json(node);
    } else {
        obj["node"] = serde_json::Value::Null;
    }

    obj
}

fn node_summary_to_json(n: &NodeSummary) -> serde_json::Value {
    serde_json::json!({
        "cost": n.cost,
        "kind": n.kind.as_str(),
        "parent": n.parent.map(|id| id.index()),
    })
}
