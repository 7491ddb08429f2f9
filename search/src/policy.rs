//! Search policy types.

use crate::error::SearchError;
use crate::node::NodeKind;

/// Per-searcher configuration that is not one of the three swappable parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Kind of the root node; every node in the search inherits it.
    pub node_kind: NodeKind,
}

impl SearchPolicy {
    /// Policy building roots of `node_kind`.
    #[must_use]
    pub fn new(node_kind: NodeKind) -> Self {
        Self { node_kind }
    }

    /// Pre-flight check against the frontier's needs.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the frontier orders by cost
    /// but the node kind carries none.
    pub fn validate(&self, frontier_requires_cost: bool) -> Result<(), SearchError> {
        if frontier_requires_cost && !self.node_kind.has_cost() {
            return Err(SearchError::InvalidPolicy {
                detail: format!(
                    "frontier orders by path cost but {} nodes carry no cost",
                    self.node_kind.as_str()
                ),
            });
        }
        Ok(())
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            node_kind: NodeKind::Path,
        }
    }
}
