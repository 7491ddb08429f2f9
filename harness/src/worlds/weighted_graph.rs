//! `WeightedGraph`: explicit weighted digraph over numbered vertices.
//!
//! Out-edges are kept in insertion order and vertices in a `BTreeMap`, so
//! successor enumeration is deterministic.

use std::collections::BTreeMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use waypoint_search::contract::{Expander, Successor};

/// Vertex label.
pub type Vertex = u32;

/// Directed graph with non-negative edge costs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedGraph {
    adjacency: BTreeMap<Vertex, Vec<(Vertex, f64)>>,
}

impl WeightedGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`WeightedGraph::add_edge`].
    #[must_use]
    pub fn edge(mut self, from: Vertex, to: Vertex, cost: f64) -> Self {
        self.add_edge(from, to, cost);
        self
    }

    /// Add `from → to`. Both vertices are created if absent.
    pub fn add_edge(&mut self, from: Vertex, to: Vertex, cost: f64) {
        debug_assert!(cost >= 0.0, "edge costs must be non-negative, got {cost}");
        self.adjacency.entry(from).or_default().push((to, cost));
        self.adjacency.entry(to).or_default();
    }

    /// Out-edges of `vertex`; empty for unknown vertices.
    #[must_use]
    pub fn out_edges(&self, vertex: Vertex) -> &[(Vertex, f64)] {
        self.adjacency.get(&vertex).map_or(&[][..], Vec::as_slice)
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.adjacency.keys().copied()
    }

    /// A seeded random layered DAG: `layers` layers of `width` vertices, with
    /// every vertex linked to 1-3 vertices of the next layer at costs 1-9.
    /// Vertex `0` is the single source in layer 0 and [`Self::layered_sink`]
    /// the single sink after the last layer.
    #[must_use]
    pub fn layered(layers: u32, width: u32, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut graph = Self::new();
        let width = width.max(1);
        let vertex = |layer: u32, slot: u32| 1 + layer * width + slot;

        for slot in 0..width {
            graph.add_edge(0, vertex(0, slot), f64::from(rng.gen_range(1u32..=9)));
        }
        for layer in 0..layers.saturating_sub(1) {
            for slot in 0..width {
                for _ in 0..rng.gen_range(1..=3) {
                    let next = rng.gen_range(0..width);
                    let cost = f64::from(rng.gen_range(1u32..=9));
                    graph.add_edge(vertex(layer, slot), vertex(layer + 1, next), cost);
                }
            }
        }
        let sink = Self::layered_sink(layers, width);
        let last = layers.saturating_sub(1);
        for slot in 0..width {
            graph.add_edge(vertex(last, slot), sink, f64::from(rng.gen_range(1u32..=9)));
        }
        graph
    }

    /// Sink vertex of [`Self::layered`] with the same dimensions.
    #[must_use]
    pub fn layered_sink(layers: u32, width: u32) -> Vertex {
        1 + layers.max(1) * width.max(1)
    }

    /// Convert to a `serde_json::Value` with sorted keys.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let edges: Vec<serde_json::Value> = self
            .adjacency
            .iter()
            .flat_map(|(from, out)| {
                out.iter()
                    .map(move |(to, cost)| serde_json::json!([from, to, cost]))
            })
            .collect();
        serde_json::json!({
            "edges": edges,
            "vertices": self.vertex_count(),
        })
    }
}

impl Expander<Vertex> for WeightedGraph {
    type Successors = std::vec::IntoIter<Successor<Vertex>>;

    fn successors(&self, state: &Vertex) -> Self::Successors {
        self.out_edges(*state)
            .iter()
            .map(|&(to, cost)| Successor::new(to, cost))
            .collect::<Vec<_>>()
            .into_iter()
    }
}

/// 0 → {1, 2} → 3 → 4, unit costs. Two equal-cost paths converge on 3.
#[must_use]
pub fn diamond() -> WeightedGraph {
    WeightedGraph::new()
        .edge(0, 1, 1.0)
        .edge(0, 2, 1.0)
        .edge(1, 3, 1.0)
        .edge(2, 3, 1.0)
        .edge(3, 4, 1.0)
}

/// 0 → 1 (1) → 3 (5), 0 → 2 (4) → 3 (1), 3 → 4 (1).
///
/// The path through 1 reaches 3 first but costs 6; the path through 2 costs
/// 5. Cheapest route to 4 costs 6.
#[must_use]
pub fn unequal_convergence() -> WeightedGraph {
    WeightedGraph::new()
        .edge(0, 1, 1.0)
        .edge(0, 2, 4.0)
        .edge(1, 3, 5.0)
        .edge(2, 3, 1.0)
        .edge(3, 4, 1.0)
}

/// 0 ⇄ 1 ⇄ 2 → 0 cycle; vertex 3 exists but is unreachable.
#[must_use]
pub fn cycle_without_exit() -> WeightedGraph {
    let mut graph = WeightedGraph::new()
        .edge(0, 1, 1.0)
        .edge(1, 0, 1.0)
        .edge(1, 2, 1.0)
        .edge(2, 1, 1.0)
        .edge(2, 0, 1.0);
    graph.adjacency.entry(3).or_default();
    graph
}
