//! Goal checking.
//!
//! The control loop calls [`GoalChecker::test`] on every popped node, before
//! expansion. If the frontier runs dry without an accepted node it calls
//! [`GoalChecker::get`] once, which lets a checker hand back a deferred
//! best-effort result instead of failing.

use std::rc::Rc;

use crate::error::SearchError;
use crate::node::{Node, OrderedCost};

/// Goal-checking contract used by the control loop.
pub trait GoalChecker<S> {
    /// Whether `node` is an accepted solution.
    fn test(&mut self, node: &Node<S>) -> bool;

    /// Deferred result, called only after the frontier is exhausted.
    ///
    /// # Errors
    ///
    /// The default returns [`SearchError::NoSolution`].
    fn get(&mut self) -> Result<Node<S>, SearchError> {
        Err(SearchError::NoSolution)
    }

    /// A checker with the same configuration and no retained state.
    #[must_use]
    fn fresh(&self) -> Self
    where
        Self: Sized;
}

/// Accepts the first popped node whose state satisfies a predicate.
pub struct GoalTest<S> {
    predicate: Rc<dyn Fn(&S) -> bool>,
}

impl<S> GoalTest<S> {
    /// Accept any state satisfying `predicate`.
    #[must_use]
    pub fn new(predicate: impl Fn(&S) -> bool + 'static) -> Self {
        Self {
            predicate: Rc::new(predicate),
        }
    }
}

impl<S: PartialEq + 'static> GoalTest<S> {
    /// Accept exactly `goal`.
    #[must_use]
    pub fn state(goal: S) -> Self {
        Self::new(move |state: &S| *state == goal)
    }
}

impl<S> GoalChecker<S> for GoalTest<S> {
    fn test(&mut self, node: &Node<S>) -> bool {
        (self.predicate)(node.state())
    }

    fn fresh(&self) -> Self {
        Self {
            predicate: Rc::clone(&self.predicate),
        }
    }
}

impl<S> std::fmt::Debug for GoalTest<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoalTest").finish_non_exhaustive()
    }
}

/// Deferred goal checker: keeps the best-scoring candidate seen and returns
/// it once the frontier is exhausted.
///
/// Nodes whose state satisfies `candidate` are scored by `score` (lower is
/// better). With an acceptance threshold, a candidate scoring at or below it
/// is accepted immediately; otherwise the search runs to exhaustion and `get`
/// returns the best candidate. Ties keep the earlier candidate.
pub struct BestCandidate<S> {
    candidate: Rc<dyn Fn(&S) -> bool>,
    score: Rc<dyn Fn(&Node<S>) -> f64>,
    accept_at: Option<f64>,
    best: Option<(OrderedCost, Node<S>)>,
    candidates_seen: u64,
}

impl<S: Clone> BestCandidate<S> {
    /// Score states satisfying `candidate` with `score`; lower is better.
    #[must_use]
    pub fn new(
        candidate: impl Fn(&S) -> bool + 'static,
        score: impl Fn(&Node<S>) -> f64 + 'static,
    ) -> Self {
        Self {
            candidate: Rc::new(candidate),
            score: Rc::new(score),
            accept_at: None,
            best: None,
            candidates_seen: 0,
        }
    }

    /// Accept the first candidate scoring at or below `threshold`.
    #[must_use]
    pub fn accept_at(mut self, threshold: f64) -> Self {
        self.accept_at = Some(threshold);
        self
    }

    /// Best candidate recorded so far, if any.
    #[must_use]
    pub fn best(&self) -> Option<&Node<S>> {
        self.best.as_ref().map(|(_, node)| node)
    }

    /// Number of candidate nodes scored.
    #[must_use]
    pub fn candidates_seen(&self) -> u64 {
        self.candidates_seen
    }
}

impl<S: Clone> GoalChecker<S> for BestCandidate<S> {
    fn test(&mut self, node: &Node<S>) -> bool {
        if !(self.candidate)(node.state()) {
            return false;
        }
        self.candidates_seen += 1;
        let score = (self.score)(node);
        if self.accept_at.is_some_and(|threshold| score <= threshold) {
            return true;
        }
        let score = OrderedCost(score);
        let improves = match &self.best {
            Some((best, _)) => score < *best,
            None => true,
        };
        if improves {
            self.best = Some((score, node.clone()));
        }
        false
    }

    fn get(&mut self) -> Result<Node<S>, SearchError> {
        self.best
            .take()
            .map(|(_, node)| node)
            .ok_or(SearchError::NoSolution)
    }

    fn fresh(&self) -> Self {
        Self {
            candidate: Rc::clone(&self.candidate),
            score: Rc::clone(&self.score),
            accept_at: self.accept_at,
            best: None,
            candidates_seen: 0,
        }
    }
}

impl<S> std::fmt::Debug for BestCandidate<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BestCandidate")
            .field("accept_at", &self.accept_at)
            .field("best_score", &self.best.as_ref().map(|(score, _)| score.get()))
            .field("candidates_seen", &self.candidates_seen)
            .finish_non_exhaustive()
    }
}
