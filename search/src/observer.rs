//! Search event observers.
//!
//! Observers see every step of the control loop and cannot influence it.

use std::fmt::Debug;

use crate::node::Node;

/// One callback per control-loop event. All default to no-ops.
pub trait SearchObserver<S> {
    /// The root was built and is about to enter the frontier.
    fn on_initial(&mut self, _node: &Node<S>) {}

    /// A node was popped from the frontier.
    fn on_pop(&mut self, _node: &Node<S>) {}

    /// A popped node failed the goal test, passed the explored set, and is
    /// being expanded.
    fn on_expand(&mut self, _node: &Node<S>) {}

    /// A child was added to the frontier.
    fn on_add(&mut self, _node: &Node<S>) {}

    /// The explored set turned a node away: a duplicate child, or a popped
    /// node whose key was closed while it waited in the frontier.
    fn on_reject(&mut self, _node: &Node<S>) {}

    /// The frontier ran dry without an accepted goal.
    fn on_exhausted(&mut self) {}

    /// The search produced a result (accepted on pop, or deferred).
    fn on_goal(&mut self, _node: &Node<S>) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<S> SearchObserver<S> for NoopObserver {}

/// Observer that forwards every event to `tracing` at TRACE level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl<S: Debug> SearchObserver<S> for LogObserver {
    fn on_initial(&mut self, node: &Node<S>) {
        tracing::trace!(state = ?node.state(), node = %node.summary(), "initial node");
    }

    fn on_pop(&mut self, node: &Node<S>) {
        tracing::trace!(state = ?node.state(), node = %node.summary(), "frontier pop");
    }

    fn on_expand(&mut self, node: &Node<S>) {
        tracing::trace!(state = ?node.state(), "expanding");
    }

    fn on_add(&mut self, node: &Node<S>) {
        tracing::trace!(state = ?node.state(), node = %node.summary(), "added to frontier");
    }

    fn on_reject(&mut self, node: &Node<S>) {
        tracing::trace!(state = ?node.state(), "duplicate rejected");
    }

    fn on_exhausted(&mut self) {
        tracing::trace!("frontier exhausted");
    }

    fn on_goal(&mut self, node: &Node<S>) {
        tracing::trace!(state = ?node.state(), node = %node.summary(), "goal found");
    }
}

/// Fans each event out to two observers, `.0` before `.1`.
#[derive(Debug, Clone, Default)]
pub struct Both<A, B>(pub A, pub B);

impl<S, A, B> SearchObserver<S> for Both<A, B>
where
    A: SearchObserver<S>,
    B: SearchObserver<S>,
{
    fn on_initial(&mut self, node: &Node<S>) {
        self.0.on_initial(node);
        self.1.on_initial(node);
    }

    fn on_pop(&mut self, node: &Node<S>) {
        self.0.on_pop(node);
        self.1.on_pop(node);
    }

    fn on_expand(&mut self, node: &Node<S>) {
        self.0.on_expand(node);
        self.1.on_expand(node);
    }

    fn on_add(&mut self, node: &Node<S>) {
        self.0.on_add(node);
        self.1.on_add(node);
    }

    fn on_reject(&mut self, node: &Node<S>) {
        self.0.on_reject(node);
        self.1.on_reject(node);
    }

    fn on_exhausted(&mut self) {
        self.0.on_exhausted();
        self.1.on_exhausted();
    }

    fn on_goal(&mut self, node: &Node<S>) {
        self.0.on_goal(node);
        self.1.on_goal(node);
    }
}
