//! Reference shortest-path costs computed without the search engine's
//! frontier, explored set or goal checker. Used as the optimality oracle.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use waypoint_search::contract::{Expander, Successor};
use waypoint_search::node::OrderedCost;

/// Cheapest cost from `start` to every reachable state (Dijkstra).
pub fn cheapest_costs<S, E>(expander: &E, start: S) -> BTreeMap<S, f64>
where
    S: Clone + Ord,
    E: Expander<S>,
{
    settle(expander, start, |_| false).0
}

/// Cheapest cost from `start` to any state satisfying `is_goal`, or `None`
/// if no goal is reachable.
pub fn cheapest_cost<S, E>(expander: &E, start: S, is_goal: impl Fn(&S) -> bool) -> Option<f64>
where
    S: Clone + Ord,
    E: Expander<S>,
{
    settle(expander, start, is_goal).1
}

/// Settles states in cost order until a goal is settled or the space is
/// exhausted. Returns the tentative costs and the settled goal's cost.
fn settle<S, E>(
    expander: &E,
    start: S,
    is_goal: impl Fn(&S) -> bool,
) -> (BTreeMap<S, f64>, Option<f64>)
where
    S: Clone + Ord,
    E: Expander<S>,
{
    let mut best: BTreeMap<S, f64> = BTreeMap::new();
    let mut heap = BinaryHeap::new();
    best.insert(start.clone(), 0.0);
    heap.push(Reverse((OrderedCost(0.0), start)));

    while let Some(Reverse((OrderedCost(cost), state))) = heap.pop() {
        if best.get(&state).is_some_and(|&known| cost > known) {
            continue; // stale entry
        }
        if is_goal(&state) {
            return (best, Some(cost));
        }
        for Successor {
            state: next,
            edge_cost,
        } in expander.successors(&state)
        {
            let candidate = cost + edge_cost;
            let improves = match best.get(&next) {
                Some(&known) => candidate < known,
                None => true,
            };
            if improves {
                best.insert(next.clone(), candidate);
                heap.push(Reverse((OrderedCost(candidate), next)));
            }
        }
    }
    (best, None)
}
