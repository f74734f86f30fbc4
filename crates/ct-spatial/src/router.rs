//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! Providers route through the [`Router`] trait, so a contraction hierarchy
//! or A* can be dropped in without touching the trip engine.  The default
//! [`DijkstraRouter`] is exact and needs no preprocessing.
//!
//! # Cost units
//!
//! Travel-time costs are integer milliseconds, length costs integer
//! millimetres, both accumulated in `u64`.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ct_core::{EdgeId, NodeId};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

// ── RawRoute ──────────────────────────────────────────────────────────────────

/// Ordered node sequence returned by a shortest-path query.
///
/// Empty when no path exists; a single node when origin == destination.
/// Neither form is a usable trip.
///
/// `edges` holds the edge taken between each consecutive node pair when the
/// router recorded it, otherwise it is empty.  Parallel edges make the node
/// sequence alone ambiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRoute {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
}

impl RawRoute {
    /// Route known only by its nodes.
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes, edges: Vec::new() }
    }

    /// Route with the edge taken at every step; `edges.len() + 1 == nodes.len()`.
    pub fn with_edges(nodes: Vec<NodeId>, edges: Vec<EdgeId>) -> Self {
        debug_assert_eq!(edges.len() + 1, nodes.len());
        Self { nodes, edges }
    }

    /// The "no path" marker.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `true` if the route has at least one edge to travel along.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.nodes.len() >= 2
    }
}

// ── EdgeWeight ────────────────────────────────────────────────────────────────

/// Which edge attribute a shortest-path query minimises.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EdgeWeight {
    /// Imputed car travel time (the commute default).
    #[default]
    TravelTime,
    /// Physical length.
    Length,
}

impl EdgeWeight {
    #[inline]
    fn cost(self, network: &RoadNetwork, edge: EdgeId) -> u64 {
        match self {
            EdgeWeight::TravelTime => network.edge_travel_ms[edge.index()] as u64,
            EdgeWeight::Length => (network.edge_length_m[edge.index()] as f64 * 1_000.0) as u64,
        }
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable single-pair routing engine.
///
/// Implementations must be `Send + Sync` so batched queries can fan out over
/// Rayon workers with the `parallel` feature.
pub trait Router: Send + Sync {
    /// Compute a route from `from` to `to`.
    ///
    /// Returns [`SpatialError::NoRoute`] if `to` is unreachable and
    /// [`SpatialError::NodeNotFound`] for ids outside the network.
    /// `from == to` yields the single-node route `[from]`.
    fn route(
        &self,
        network: &RoadNetwork,
        from:    NodeId,
        to:      NodeId,
        weight:  EdgeWeight,
    ) -> SpatialResult<RawRoute>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the CSR road graph.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        network: &RoadNetwork,
        from:    NodeId,
        to:      NodeId,
        weight:  EdgeWeight,
    ) -> SpatialResult<RawRoute> {
        for node in [from, to] {
            if !network.contains_node(node) {
                return Err(SpatialError::NodeNotFound(node));
            }
        }
        dijkstra(network, from, to, weight)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn dijkstra(
    network: &RoadNetwork,
    from:    NodeId,
    to:      NodeId,
    weight:  EdgeWeight,
) -> SpatialResult<RawRoute> {
    if from == to {
        return Ok(RawRoute::new(vec![from]));
    }

    let n = network.node_count();
    let mut dist      = vec![u64::MAX; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0;

    // Min-heap on (cost, node); NodeId breaks ties deterministically.
    let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(network, &prev_edge, from, to));
        }

        // Stale heap entry.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost.saturating_add(weight.cost(network, edge));

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(network: &RoadNetwork, prev_edge: &[EdgeId], from: NodeId, to: NodeId) -> RawRoute {
    let mut nodes = vec![to];
    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        edges.push(e);
        cur = network.edge_from[e.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    edges.reverse();
    RawRoute::with_edges(nodes, edges)
}
