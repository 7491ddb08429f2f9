//! Shared helpers for waypoint benchmark suites.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use waypoint_harness::worlds::grid::{manhattan, Cell, Grid};
use waypoint_search::astar::{AStar, AStarSearcher};
use waypoint_search::explored::{ArtifactSet, RecordAt};
use waypoint_search::goal::GoalTest;
use waypoint_search::search::{GraphSearcher, SearchCounters};

/// A grid world with its start and goal.
pub struct GridScenario {
    pub name: &'static str,
    pub grid: Grid,
    pub start: Cell,
    pub goal: Cell,
}

/// Install a `tracing` subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Open and scattered square grids, corner to corner.
///
/// # Panics
///
/// Panics if a grid cannot be built. The sizes here are fixed and valid.
#[must_use]
pub fn grid_scenarios() -> Vec<GridScenario> {
    let mut scenarios = Vec::new();
    for (name, grid) in [
        ("open_16", Grid::open(16, 16)),
        ("open_48", Grid::open(48, 48)),
        ("scattered_48", Grid::scattered(48, 48, 200, 17)),
    ] {
        let grid = grid.unwrap_or_else(|e| panic!("{name}: {e}"));
        let goal = grid.far_corner();
        scenarios.push(GridScenario {
            name,
            grid,
            start: Cell::new(0, 0),
            goal,
        });
    }
    scenarios
}

/// Breadth-first search with state tracking. Returns the counters.
#[must_use]
pub fn run_bfs(scenario: &GridScenario) -> Option<SearchCounters> {
    let mut searcher = GraphSearcher::breadth_first(
        &scenario.grid,
        ArtifactSet::by_state(),
        GoalTest::state(scenario.goal),
    );
    let _outcome = searcher.search(scenario.start);
    searcher.last_counters()
}

/// Tracked Manhattan A* searcher for a scenario.
#[must_use]
pub fn astar_searcher(
    scenario: &GridScenario,
) -> AStarSearcher<Cell, &Grid, ArtifactSet<Cell, Cell>, GoalTest<Cell>> {
    let goal = scenario.goal;
    AStar::from_state_heuristic(move |cell: &Cell| manhattan(*cell, goal)).tracked_searcher(
        &scenario.grid,
        ArtifactSet::by_state().recording_at(RecordAt::Expansion),
        GoalTest::state(goal),
    )
}

/// Tracked Manhattan A*. Returns the counters.
#[must_use]
pub fn run_astar(scenario: &GridScenario) -> Option<SearchCounters> {
    let mut searcher = astar_searcher(scenario);
    let _outcome = searcher.search(scenario.start);
    searcher.last_counters()
}

/// Counters as a JSON object with sorted keys, for bench logs.
#[must_use]
pub fn counters_json(counters: Option<SearchCounters>) -> serde_json::Value {
    match counters {
        Some(c) => serde_json::json!({
            "added": c.added,
            "expanded": c.expanded,
            "rejected": c.rejected,
            "unexpanded": c.unexpanded,
        }),
        None => serde_json::Value::Null,
    }
}

/// Log the work each algorithm does on `scenario` once, before timing.
pub fn log_scenario_work(scenario: &GridScenario) {
    tracing::info!(
        scenario = scenario.name,
        open_cells = scenario.grid.open_cells(),
        bfs = %counters_json(run_bfs(scenario)),
        astar = %counters_json(run_astar(scenario)),
        "scenario work"
    );
}
