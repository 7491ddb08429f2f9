//! Duplicate-suppression lock tests: converging paths with and without an
//! explored set.

use waypoint_harness::worlds::grid::{Cell, Grid};
use waypoint_harness::worlds::weighted_graph::{diamond, unequal_convergence, WeightedGraph};
use waypoint_search::astar::AStar;
use waypoint_search::explored::{ArtifactSet, NoTracking, RecordAt};
use waypoint_search::goal::GoalTest;
use waypoint_search::search::{GraphSearcher, SearchCounters};
use waypoint_search::trace::{SearchTrace, TraceEventKind};

use lock_tests::fixtures::{grid_astar, grid_bfs, open_3x3, GOAL, START};

fn vertex_label(v: &u32) -> String {
    v.to_string()
}

#[test]
fn tracked_bfs_expands_converging_state_once() {
    let graph = diamond();
    let mut searcher =
        GraphSearcher::breadth_first(&graph, ArtifactSet::by_state(), GoalTest::state(4));
    let mut trace = SearchTrace::new(vertex_label);
    let solution = searcher.search_observed(0, &mut trace).unwrap();

    assert_eq!(solution.path_len(), 4);
    assert_eq!(trace.expansions_of("3"), 1);
    assert_eq!(searcher.last_rejected(), Some(1), "second path into 3");
    assert_eq!(trace.expansion_order(), vec!["0", "1", "2", "3"]);
}

#[test]
fn untracked_bfs_expands_converging_state_twice() {
    let graph = diamond();
    let mut searcher = GraphSearcher::breadth_first(&graph, NoTracking, GoalTest::state(4));
    let mut trace = SearchTrace::new(vertex_label);
    let solution = searcher.search_observed(0, &mut trace).unwrap();

    assert_eq!(*solution.state(), 4);
    assert_eq!(trace.expansions_of("3"), 2);
    assert_eq!(searcher.last_rejected(), Some(0));
    assert_eq!(searcher.last_unexpanded(), Some(1), "second copy of 4 left open");
}

#[test]
fn tracked_astar_expands_converging_state_once() {
    let graph = diamond();
    let mut searcher = AStar::uniform_cost().tracked_searcher(
        &graph,
        ArtifactSet::by_state(),
        GoalTest::state(4),
    );
    let mut trace = SearchTrace::new(vertex_label);
    let solution = searcher.search_observed(0, &mut trace).unwrap();
    assert_eq!(solution.cost(), Some(3.0));
    assert_eq!(trace.expansions_of("3"), 1);
}

#[test]
fn every_grid_cell_expanded_at_most_once_when_tracked() {
    let grid = open_3x3();
    let mut searcher = grid_bfs(&grid, Cell::new(9, 9));
    let mut trace = SearchTrace::new(|cell: &Cell| cell.to_string());
    let err = searcher.search_observed(START, &mut trace).unwrap_err();
    assert!(err.is_no_solution());

    for row in 0..3 {
        for col in 0..3 {
            let label = Cell::new(row, col).to_string();
            assert_eq!(trace.expansions_of(&label), 1, "{label}");
        }
    }
    assert_eq!(searcher.last_expanded(), Some(9));
    assert_eq!(searcher.last_added(), Some(9));
}

#[test]
fn untracked_grid_search_revisits_but_still_finds_goal() {
    let grid = open_3x3();
    let mut tracked = grid_bfs(&grid, GOAL);
    let mut untracked = GraphSearcher::breadth_first(&grid, NoTracking, GoalTest::state(GOAL));

    let a = tracked.search(START).unwrap();
    let b = untracked.search(START).unwrap();
    assert_eq!(a.path_len(), b.path_len());
    assert!(untracked.last_expanded().unwrap() > tracked.last_expanded().unwrap());
    assert_eq!(untracked.last_rejected(), Some(0));
}

#[test]
fn expansion_recording_expands_each_vertex_once() {
    // Both copies of 3 are on the frontier before either is popped. The
    // second is popped after 3 is closed and is dropped unexpanded.
    let graph = WeightedGraph::new()
        .edge(0, 1, 1.0)
        .edge(0, 2, 1.0)
        .edge(1, 3, 1.0)
        .edge(2, 3, 1.0);
    let mut searcher = GraphSearcher::breadth_first(
        &graph,
        ArtifactSet::by_state().recording_at(RecordAt::Expansion),
        GoalTest::state(99),
    );
    let mut trace = SearchTrace::new(vertex_label);
    assert!(searcher.search_observed(0, &mut trace).unwrap_err().is_no_solution());
    assert_eq!(trace.expansions_of("3"), 1);
    assert_eq!(trace.expansion_order(), vec!["0", "1", "2", "3"]);
    assert_eq!(trace.count(TraceEventKind::Pop), 5);
    assert_eq!(searcher.last_expanded(), Some(4));
    assert_eq!(searcher.last_rejected(), Some(1), "late copy of 3");
}

#[test]
fn expansion_recording_drops_dearer_copy_on_unequal_convergence() {
    let graph = unequal_convergence();
    let mut searcher = AStar::uniform_cost().tracked_searcher(
        &graph,
        ArtifactSet::by_state().recording_at(RecordAt::Expansion),
        GoalTest::state(4),
    );
    let mut trace = SearchTrace::new(vertex_label);
    let solution = searcher.search_observed(0, &mut trace).unwrap();

    assert_eq!(solution.cost(), Some(6.0));
    assert_eq!(trace.expansions_of("3"), 1);
    assert_eq!(trace.expansion_order(), vec!["0", "1", "2", "3"]);
    assert_eq!(
        searcher.last_counters(),
        Some(SearchCounters {
            added: 6,
            rejected: 1,
            expanded: 4,
            unexpanded: 0,
        })
    );
}

#[test]
fn tracked_grid_astar_expands_each_cell_at_most_once() {
    for seed in 0..8 {
        let grid = Grid::scattered(12, 12, 200, seed).unwrap();
        let mut trace = SearchTrace::new(|cell: &Cell| cell.to_string());
        let _outcome = grid_astar(&grid, grid.far_corner()).search_observed(START, &mut trace);

        let mut expanded = trace.expansion_order();
        let total = expanded.len();
        expanded.sort_unstable();
        expanded.dedup();
        assert_eq!(expanded.len(), total, "seed {seed}: a cell was expanded twice");
        for label in &expanded {
            assert!(trace.expansions_of(label) <= 1, "seed {seed}: {label}");
        }
    }
}
