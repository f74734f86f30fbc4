//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_length_m`, `edge_travel_ms`)
//! are sorted by source node and indexed by `EdgeId`.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `NodeId`.  Zone
//! centroids are snapped to road nodes through it before any routing.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use ct_core::{EdgeId, GeoPoint, NodeId};

use crate::router::RawRoute;
use crate::{SpatialError, SpatialResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lat, lon]` point with
/// the associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Good enough for snapping
    /// a zone centroid to the closest node within one city.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph in CSR format plus a spatial index for node snapping.
///
/// Read-only once built; one instance is shared by every batch of a run.
/// Do not construct directly; use [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// CSR row pointer.  Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source node of each edge.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Length of each edge in metres.
    pub edge_length_m: Vec<f32>,

    /// Imputed car travel time in milliseconds.
    pub edge_travel_ms: Vec<u32>,

    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    #[inline]
    pub fn contains_node(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// The fastest directed edge `from → to`, if any.
    ///
    /// Only a fallback for routes that did not record their edges: with
    /// parallel edges and [`EdgeWeight::Length`](crate::EdgeWeight) the
    /// routed edge may be a slower one.
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        if !self.contains_node(from) {
            return None;
        }
        self.out_edges(from)
            .filter(|e| self.edge_to[e.index()] == to)
            .min_by_key(|e| self.edge_travel_ms[e.index()])
    }

    /// Travel time in seconds of every consecutive node pair in `route`.
    ///
    /// Uses the route's recorded edges when present, otherwise the fastest
    /// edge between each node pair.  Length is `route.len() - 1` (empty for
    /// routes with < 2 nodes).
    pub fn route_travel_secs(&self, route: &RawRoute) -> SpatialResult<Vec<f64>> {
        if !route.edges.is_empty() && route.edges.len() + 1 == route.len() {
            return route
                .edges
                .iter()
                .zip(route.nodes.windows(2))
                .map(|(&e, pair)| {
                    let (from, to) = (pair[0], pair[1]);
                    match self.edge_travel_ms.get(e.index()) {
                        Some(&ms) if self.edge_from[e.index()] == from && self.edge_to[e.index()] == to => {
                            Ok(ms as f64 / 1_000.0)
                        }
                        _ => Err(SpatialError::MissingEdge { from, to }),
                    }
                })
                .collect();
        }
        route
            .nodes
            .windows(2)
            .map(|pair| {
                let (from, to) = (pair[0], pair[1]);
                self.edge_between(from, to)
                    .map(|e| self.edge_travel_ms[e.index()] as f64 / 1_000.0)
                    .ok_or(SpatialError::MissingEdge { from, to })
            })
            .collect()
    }

    /// Position of `node`.
    pub fn position(&self, node: NodeId) -> SpatialResult<GeoPoint> {
        self.node_pos
            .get(node.index())
            .copied()
            .ok_or(SpatialError::NodeNotFound(node))
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `NodeId` of the nearest road node to `pos`.
    ///
    /// Returns `None` only if the network has no nodes.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }

    // ── Derived networks ──────────────────────────────────────────────────

    /// A new network holding only the nodes for which `keep` returns `true`
    /// and the edges whose endpoints were both kept.  Node ids are
    /// renumbered densely in their original order.
    pub fn subgraph<F>(&self, mut keep: F) -> RoadNetwork
    where
        F: FnMut(GeoPoint) -> bool,
    {
        let mut remap = vec![NodeId::INVALID; self.node_count()];
        let mut b = RoadNetworkBuilder::with_capacity(self.node_count(), self.edge_count());
        for (i, &pos) in self.node_pos.iter().enumerate() {
            if keep(pos) {
                remap[i] = b.add_node(pos);
            }
        }
        for e in 0..self.edge_count() {
            let from = remap[self.edge_from[e].index()];
            let to   = remap[self.edge_to[e].index()];
            if from != NodeId::INVALID && to != NodeId::INVALID {
                b.add_directed_edge(from, to, self.edge_length_m[e], self.edge_travel_ms[e]);
            }
        }
        b.build()
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts nodes and directed edges in any order.  `build()`
/// sorts edges by source node, constructs the CSR arrays, and bulk-loads the
/// R-tree.
///
/// # Example
///
/// ```
/// use ct_core::GeoPoint;
/// use ct_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(-33.45, -70.66));
/// let c = b.add_node(GeoPoint::new(-33.44, -70.65));
/// b.add_road(a, c, 1_200.0, 90_000); // 1.2 km, 90 s
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:     Vec<GeoPoint>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:      NodeId,
    to:        NodeId,
    length_m:  f32,
    travel_ms: u32,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), raw_edges: Vec::new() }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a road node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add a **directed** edge from `from` to `to`.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_m: f32, travel_ms: u32) {
        self.raw_edges.push(RawEdge { from, to, length_m, travel_ms });
    }

    /// Add edges in both directions for an undirected road segment.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f32, travel_ms: u32) {
        self.add_directed_edge(a, b, length_m, travel_ms);
        self.add_directed_edge(b, a, length_m, travel_ms);
    }

    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    pub fn build(self) -> RoadNetwork {
        let RoadNetworkBuilder { nodes, mut raw_edges } = self;

        // Stable: parallel edges keep insertion order, so travel-time ties
        // resolve identically on every build.
        raw_edges.sort_by_key(|e| e.from.0);

        let mut degree = vec![0u32; nodes.len()];
        for e in &raw_edges {
            degree[e.from.index()] += 1;
        }
        let node_out_start: Vec<u32> = std::iter::once(0)
            .chain(degree.iter().scan(0u32, |offset, &d| {
                *offset += d;
                Some(*offset)
            }))
            .collect();

        let n = raw_edges.len();
        let mut edge_from      = Vec::with_capacity(n);
        let mut edge_to        = Vec::with_capacity(n);
        let mut edge_length_m  = Vec::with_capacity(n);
        let mut edge_travel_ms = Vec::with_capacity(n);
        for e in raw_edges {
            edge_from.push(e.from);
            edge_to.push(e.to);
            edge_length_m.push(e.length_m);
            edge_travel_ms.push(e.travel_ms);
        }

        let spatial_idx = RTree::bulk_load(
            nodes
                .iter()
                .zip(0u32..)
                .map(|(pos, i)| NodeEntry { point: [pos.lat, pos.lon], id: NodeId(i) })
                .collect(),
        );

        RoadNetwork {
            node_pos: nodes,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            edge_travel_ms,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
