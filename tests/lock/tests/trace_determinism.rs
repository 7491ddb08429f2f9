//! Trace lock tests: recorded search traces are byte-identical across runs
//! and their digests are bound to the serialized bytes.

use waypoint_harness::worlds::grid::{Cell, Grid};
use waypoint_search::fingerprint::DOMAIN_SEARCH_TRACE;
use waypoint_search::observer::{Both, LogObserver};
use waypoint_search::trace::{SearchTrace, TRACE_SCHEMA};

use lock_tests::fixtures::{grid_astar, grid_bfs, independent_digest, START};

fn label(cell: &Cell) -> String {
    cell.to_string()
}

/// Trace of a tracked A* run to the far corner. Unsolvable grids still
/// record a full trace ending in exhaustion.
fn astar_trace(grid: &Grid) -> SearchTrace<Cell> {
    let mut trace = SearchTrace::new(label);
    let _outcome = grid_astar(grid, grid.far_corner()).search_observed(START, &mut trace);
    trace
}

#[test]
fn trace_bytes_identical_across_runs_n10() {
    let grid = Grid::scattered(10, 10, 200, 3).unwrap();
    let first = astar_trace(&grid).to_json_bytes().unwrap();
    for _ in 1..10 {
        let other = astar_trace(&grid).to_json_bytes().unwrap();
        assert_eq!(first, other, "trace bytes differ across runs");
    }
}

#[test]
fn one_searcher_reused_records_identical_traces() {
    let grid = Grid::scattered(10, 10, 200, 4).unwrap();
    let mut searcher = grid_bfs(&grid, grid.far_corner());
    let mut a = SearchTrace::new(label);
    let mut b = SearchTrace::new(label);
    let _ = searcher.search_observed(START, &mut a);
    let _ = searcher.search_observed(START, &mut b);
    assert_eq!(a.digest().unwrap(), b.digest().unwrap());
}

#[test]
fn digest_is_domain_separated_sha256_of_bytes() {
    let trace = astar_trace(&Grid::open(4, 4).unwrap());
    let bytes = trace.to_json_bytes().unwrap();
    let digest = trace.digest().unwrap();
    assert_eq!(digest.algorithm(), "sha256");
    assert_eq!(digest.to_string(), independent_digest(DOMAIN_SEARCH_TRACE, &bytes));
}

#[test]
fn different_worlds_give_different_digests() {
    let a = astar_trace(&Grid::scattered(8, 8, 150, 1).unwrap());
    let b = astar_trace(&Grid::scattered(8, 8, 150, 2).unwrap());
    assert_ne!(a.digest().unwrap(), b.digest().unwrap());
}

#[test]
fn trace_json_shape() {
    let trace = astar_trace(&Grid::open(3, 3).unwrap());
    let json: serde_json::Value = serde_json::from_slice(&trace.to_json_bytes().unwrap()).unwrap();
    assert_eq!(json["schema"], TRACE_SCHEMA);

    let events = json["events"].as_array().unwrap();
    assert_eq!(events[0]["kind"], "initial");
    assert_eq!(events[0]["state"], "(0,0)");
    assert_eq!(events[0]["node"]["kind"], "cost_path");
    assert_eq!(events.last().unwrap()["kind"], "goal");
    assert_eq!(events.last().unwrap()["state"], "(2,2)");
    assert_eq!(events.last().unwrap()["node"]["cost"], 4.0);
    for (i, event) in events.iter().enumerate() {
        assert_eq!(event["order"], i);
    }
}

#[test]
fn observers_do_not_change_the_outcome() {
    let grid = Grid::scattered(12, 12, 200, 9).unwrap();
    let goal = grid.far_corner();

    let mut plain = grid_astar(&grid, goal);
    let plain_result = plain.search(START).map(|s| s.cost());

    let mut observed = grid_astar(&grid, goal);
    let mut both = Both(LogObserver, SearchTrace::new(label));
    let observed_result = observed.search_observed(START, &mut both).map(|s| s.cost());

    assert_eq!(plain_result, observed_result);
    assert_eq!(plain.last_counters(), observed.last_counters());
    assert!(both.1.events().len() > 1);
}
