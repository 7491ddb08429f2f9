//! Typed search errors.
//!
//! `SearchError::NoSolution` is the ordinary outcome of a search that ran out
//! of frontier without accepting a goal. The other variants signal a broken
//! configuration or a broken frontier implementation and are never produced by
//! a correct setup.

use crate::frontier::FrontierEmpty;

/// Failure outcome of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The frontier was exhausted and the goal checker had no deferred result.
    NoSolution,
    /// `pop` was called on an empty frontier.
    ///
    /// The control loop only pops after an `is_empty` check, so this means the
    /// frontier implementation disagrees with itself.
    FrontierEmpty,
    /// The policy cannot be honoured by the configured parts. Returned before
    /// the root node is built.
    InvalidPolicy { detail: String },
}

impl SearchError {
    /// Whether this is the expected "no goal reachable" outcome.
    #[must_use]
    pub fn is_no_solution(&self) -> bool {
        matches!(self, Self::NoSolution)
    }
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSolution => write!(f, "search failed: frontier exhausted without a goal"),
            Self::FrontierEmpty => write!(f, "internal error: pop from an empty frontier"),
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<FrontierEmpty> for SearchError {
    fn from(_: FrontierEmpty) -> Self {
        Self::FrontierEmpty
    }
}
