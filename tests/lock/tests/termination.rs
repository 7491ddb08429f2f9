//! Termination lock tests: success on reachable goals, typed failure on
//! unreachable ones, and propagation of everything that is not a plain
//! search failure.

use waypoint_harness::worlds::grid::{Cell, Grid};
use waypoint_harness::worlds::weighted_graph::{cycle_without_exit, WeightedGraph};
use waypoint_search::astar::AStar;
use waypoint_search::contract::Uncosted;
use waypoint_search::error::SearchError;
use waypoint_search::explored::{ArtifactSet, NoTracking};
use waypoint_search::frontier::{Frontier, FrontierEmpty, QueueFrontier};
use waypoint_search::goal::GoalTest;
use waypoint_search::node::{Node, NodeKind};
use waypoint_search::policy::SearchPolicy;
use waypoint_search::search::{GraphSearcher, SearchParts};
use waypoint_search::trace::{SearchTrace, TraceEventKind};

use lock_tests::fixtures::{grid_astar, grid_bfs, START};

/// Queue frontier that loses every node after the first `budget` pops but
/// keeps reporting them as open.
struct LeakyFrontier {
    inner: QueueFrontier<u32>,
    budget: usize,
}

impl Frontier<u32> for LeakyFrontier {
    fn add(&mut self, node: Node<u32>) {
        self.inner.add(node);
    }

    fn pop(&mut self) -> Result<Node<u32>, FrontierEmpty> {
        if self.budget == 0 {
            return Err(FrontierEmpty);
        }
        self.budget -= 1;
        self.inner.pop()
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn count_open(&self) -> usize {
        self.inner.count_open()
    }

    fn debug_display(&self) -> String {
        format!("leaky budget={} {}", self.budget, self.inner.debug_display())
    }

    fn fresh(&self) -> Self {
        Self {
            inner: self.inner.fresh(),
            budget: 2,
        }
    }
}

#[test]
fn reachable_goal_in_acyclic_space_is_found() {
    // Binary tree over u32 labels, depth 6, no tracking needed.
    let tree = Uncosted(|n: &u32| if *n < 64 { vec![2 * n, 2 * n + 1] } else { Vec::new() });
    let mut searcher =
        GraphSearcher::breadth_first(tree, NoTracking, GoalTest::new(|n: &u32| *n == 77));
    let solution = searcher.search(1).unwrap();
    assert_eq!(*solution.state(), 77);
    assert_eq!(solution.path_to_string(), "1 -> 2 -> 4 -> 9 -> 19 -> 38 -> 77");
}

#[test]
fn unreachable_goal_in_finite_acyclic_space_fails() {
    let tree = Uncosted(|n: &u32| if *n < 64 { vec![2 * n, 2 * n + 1] } else { Vec::new() });
    let mut searcher = GraphSearcher::breadth_first(tree, NoTracking, GoalTest::state(1000));
    assert_eq!(searcher.search(1).unwrap_err(), SearchError::NoSolution);
    assert_eq!(searcher.solvable(1), Ok(false));
    assert_eq!(searcher.last_unexpanded(), Some(0));
}

#[test]
fn tracked_search_on_cycle_terminates_with_failure() {
    let graph = cycle_without_exit();
    let mut bfs = GraphSearcher::breadth_first(&graph, ArtifactSet::by_state(), GoalTest::state(3));
    let mut trace = SearchTrace::new(|v: &u32| v.to_string());
    let err = bfs.search_observed(0, &mut trace).unwrap_err();

    assert!(err.is_no_solution());
    assert_eq!(bfs.last_expanded(), Some(3));
    assert_eq!(trace.count(TraceEventKind::Exhausted), 1);
    assert_eq!(trace.count(TraceEventKind::Goal), 0);

    let mut astar =
        AStar::uniform_cost().tracked_searcher(&graph, ArtifactSet::by_state(), GoalTest::state(3));
    assert_eq!(astar.solvable(0), Ok(false));
}

#[test]
fn walled_off_goal_is_unsolvable() {
    let grid = Grid::parse(
        "
        ..#.
        ..#.
        ###.
        ",
    )
    .unwrap();
    let goal = Cell::new(0, 3);
    assert_eq!(grid_bfs(&grid, goal).solvable(START), Ok(false));
    assert_eq!(grid_astar(&grid, goal).solvable(START), Ok(false));
    assert_eq!(grid_bfs(&grid, Cell::new(1, 1)).solvable(START), Ok(true));
}

#[test]
fn search_can_run_again_after_failure() {
    let graph = WeightedGraph::new().edge(0, 1, 1.0).edge(1, 2, 1.0);
    let mut searcher =
        GraphSearcher::breadth_first(&graph, ArtifactSet::by_state(), GoalTest::state(2));
    assert!(searcher.search(2).is_ok(), "start is the goal");
    assert_eq!(searcher.search(5).unwrap_err(), SearchError::NoSolution);
    assert_eq!(searcher.last_added(), Some(1));
    let solution = searcher.search(0).unwrap();
    assert_eq!(solution.path_len(), 3);
    assert_eq!(searcher.last_expanded(), Some(2));
}

#[test]
fn broken_frontier_error_escapes_solvable() {
    let chain = Uncosted(|n: &u32| vec![n + 1]);
    let mut searcher = GraphSearcher::new(
        chain,
        SearchParts::new(
            LeakyFrontier {
                inner: QueueFrontier::new(),
                budget: 2,
            },
            NoTracking,
            GoalTest::state(10),
        ),
        SearchPolicy::default(),
    );
    assert_eq!(searcher.solvable(0), Err(SearchError::FrontierEmpty));
    assert_eq!(searcher.last_expanded(), Some(2));
    assert_eq!(searcher.last_unexpanded(), Some(1));
}

#[test]
fn invalid_policy_is_reported_before_searching() {
    let graph = WeightedGraph::new().edge(0, 1, 1.0);
    let astar = AStar::uniform_cost();
    let mut searcher = GraphSearcher::new(
        &graph,
        SearchParts::new(astar.frontier(), NoTracking, GoalTest::state(1)),
        SearchPolicy::new(NodeKind::Plain),
    );
    let err = searcher.solvable(0).unwrap_err();
    assert!(matches!(err, SearchError::InvalidPolicy { .. }), "{err}");
    assert!(err.to_string().contains("plain"));
    assert_eq!(searcher.last_counters(), None);
}
