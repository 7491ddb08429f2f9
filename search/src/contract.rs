//! Expansion contract between a search space and the control loop.

/// One outgoing edge of a state.
#[derive(Debug, Clone, PartialEq)]
pub struct Successor<S> {
    /// The state reached.
    pub state: S,
    /// Cost of the edge. Must be non-negative for cost-ordered search.
    pub edge_cost: f64,
}

impl<S> Successor<S> {
    /// Edge into `state` costing `edge_cost`.
    #[must_use]
    pub fn new(state: S, edge_cost: f64) -> Self {
        Self { state, edge_cost }
    }
}

/// Trait for search spaces that can enumerate the successors of a state.
///
/// # Contract
///
/// - The returned sequence must be finite.
/// - Enumeration should be deterministic: same state, same successors in the
///   same order. The search outcome (and any recorded trace) is only
///   reproducible if it is.
/// - Edge costs must be non-negative when nodes carry cost. Negative edges
///   break the monotonicity that A* relies on; this is not checked in
///   release builds.
pub trait Expander<S> {
    /// Iterator over the successors of one state.
    type Successors: Iterator<Item = Successor<S>>;

    /// Enumerate the successors of `state`.
    fn successors(&self, state: &S) -> Self::Successors;
}

impl<S, E: Expander<S> + ?Sized> Expander<S> for &E {
    type Successors = E::Successors;

    fn successors(&self, state: &S) -> Self::Successors {
        (**self).successors(state)
    }
}

/// Adapts `Fn(&S) -> impl IntoIterator<Item = (S, f64)>` into an [`Expander`].
#[derive(Debug, Clone, Copy)]
pub struct Costed<F>(pub F);

impl<S, F, I> Expander<S> for Costed<F>
where
    F: Fn(&S) -> I,
    I: IntoIterator<Item = (S, f64)>,
{
    type Successors = std::iter::Map<I::IntoIter, fn((S, f64)) -> Successor<S>>;

    fn successors(&self, state: &S) -> Self::Successors {
        let edge: fn((S, f64)) -> Successor<S> =
            |(state, edge_cost)| Successor { state, edge_cost };
        (self.0)(state).into_iter().map(edge)
    }
}

/// Adapts `Fn(&S) -> impl IntoIterator<Item = S>` into an [`Expander`].
///
/// Every edge costs `1.0`, so cost-carrying nodes built from an uncosted space
/// record their depth.
#[derive(Debug, Clone, Copy)]
pub struct Uncosted<F>(pub F);

impl<S, F, I> Expander<S> for Uncosted<F>
where
    F: Fn(&S) -> I,
    I: IntoIterator<Item = S>,
{
    type Successors = std::iter::Map<I::IntoIter, fn(S) -> Successor<S>>;

    fn successors(&self, state: &S) -> Self::Successors {
        let edge: fn(S) -> Successor<S> = |state| Successor {
            state,
            edge_cost: 1.0,
        };
        (self.0)(state).into_iter().map(edge)
    }
}
