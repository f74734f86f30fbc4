//! The road-network provider seam used by the trip engine.
//!
//! The engine never touches map acquisition, speed imputation or path
//! search directly.  It asks a [`NetworkProvider`] for four things:
//!
//! | Operation             | Contract                                                 |
//! |-----------------------|----------------------------------------------------------|
//! | `build`               | routable graph for an area polygon                       |
//! | `nearest_node`        | closest graph node to a point                            |
//! | `shortest_paths`      | one [`RawRoute`] per input pair, in input order          |
//! | `edge_travel_times`   | per-edge seconds along a route                           |
//!
//! `shortest_paths` is all-or-nothing: an unreachable pair becomes an empty
//! route, while any other failure fails the whole call.

use geo::{Intersects, Point, Polygon};
use log::debug;

use ct_core::{GeoPoint, NodeId};

use crate::network::RoadNetwork;
use crate::router::{DijkstraRouter, EdgeWeight, RawRoute, Router};
use crate::{SpatialError, SpatialResult};

// ── NetworkProvider trait ─────────────────────────────────────────────────────

/// Source of routable road graphs plus the queries the engine runs on them.
///
/// One built [`RoadNetwork`] is shared read-only across every batch of a
/// run, hence the `Send + Sync` bound.
pub trait NetworkProvider: Send + Sync {
    /// Build the road graph covering `area` (WGS-84, `x = lon`, `y = lat`).
    fn build(&self, area: &Polygon<f64>) -> SpatialResult<RoadNetwork>;

    /// Nearest graph node to `pos`.
    fn nearest_node(&self, network: &RoadNetwork, pos: GeoPoint) -> SpatialResult<NodeId> {
        network.snap_to_node(pos).ok_or(SpatialError::EmptyNetwork)
    }

    /// Shortest path for every `(origin, destination)` pair, in input order.
    fn shortest_paths(
        &self,
        network: &RoadNetwork,
        pairs:   &[(NodeId, NodeId)],
        weight:  EdgeWeight,
    ) -> SpatialResult<Vec<RawRoute>>;

    /// Travel time in seconds of each edge along `route`.
    fn edge_travel_times(&self, network: &RoadNetwork, route: &RawRoute) -> SpatialResult<Vec<f64>> {
        network.route_travel_secs(route)
    }

    /// Position of a graph node.
    fn node_position(&self, network: &RoadNetwork, node: NodeId) -> SpatialResult<GeoPoint> {
        network.position(node)
    }
}

impl<T: NetworkProvider + ?Sized> NetworkProvider for &T {
    fn build(&self, area: &Polygon<f64>) -> SpatialResult<RoadNetwork> {
        (**self).build(area)
    }

    fn nearest_node(&self, network: &RoadNetwork, pos: GeoPoint) -> SpatialResult<NodeId> {
        (**self).nearest_node(network, pos)
    }

    fn shortest_paths(
        &self,
        network: &RoadNetwork,
        pairs:   &[(NodeId, NodeId)],
        weight:  EdgeWeight,
    ) -> SpatialResult<Vec<RawRoute>> {
        (**self).shortest_paths(network, pairs, weight)
    }

    fn edge_travel_times(&self, network: &RoadNetwork, route: &RawRoute) -> SpatialResult<Vec<f64>> {
        (**self).edge_travel_times(network, route)
    }

    fn node_position(&self, network: &RoadNetwork, node: NodeId) -> SpatialResult<GeoPoint> {
        (**self).node_position(network, node)
    }
}

// ── Batched routing helper ────────────────────────────────────────────────────

/// Run `router` over every pair and collect results in input order.
///
/// `NoRoute` becomes [`RawRoute::empty`]; any other error aborts the batch.
/// With the `parallel` feature the searches run on Rayon's pool.
pub fn batch_shortest_paths<R: Router>(
    router:  &R,
    network: &RoadNetwork,
    pairs:   &[(NodeId, NodeId)],
    weight:  EdgeWeight,
) -> SpatialResult<Vec<RawRoute>> {
    let one = |&(from, to): &(NodeId, NodeId)| -> SpatialResult<RawRoute> {
        match router.route(network, from, to, weight) {
            Ok(route) => Ok(route),
            Err(SpatialError::NoRoute { .. }) => Ok(RawRoute::empty()),
            Err(e) => Err(e),
        }
    };

    #[cfg(not(feature = "parallel"))]
    let routes = pairs.iter().map(one).collect();

    #[cfg(feature = "parallel")]
    let routes = {
        use rayon::prelude::*;
        pairs.par_iter().map(one).collect()
    };

    routes
}

// ── StaticProvider ────────────────────────────────────────────────────────────

/// Provider over an already-loaded network.
///
/// `build` clips the held network to the requested area: nodes outside the
/// polygon are dropped along with their edges.  Nodes on the boundary stay.  Useful for tests, synthetic
/// networks and networks deserialized from a cache.
pub struct StaticProvider<R: Router = DijkstraRouter> {
    network: RoadNetwork,
    router:  R,
    clip:    bool,
}

impl StaticProvider<DijkstraRouter> {
    pub fn new(network: RoadNetwork) -> Self {
        Self::with_router(network, DijkstraRouter)
    }
}

impl<R: Router> StaticProvider<R> {
    pub fn with_router(network: RoadNetwork, router: R) -> Self {
        Self { network, router, clip: true }
    }

    /// Return the whole network from `build`, ignoring the area.
    pub fn without_clipping(mut self) -> Self {
        self.clip = false;
        self
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }
}

impl<R: Router> NetworkProvider for StaticProvider<R> {
    fn build(&self, area: &Polygon<f64>) -> SpatialResult<RoadNetwork> {
        let network = if self.clip {
            self.network
                .subgraph(|pos| area.intersects(&Point::new(pos.lon, pos.lat)))
        } else {
            self.network.subgraph(|_| true)
        };
        if network.is_empty() {
            return Err(SpatialError::EmptyNetwork);
        }
        debug!(
            "static provider: {} of {} nodes inside the area",
            network.node_count(),
            self.network.node_count()
        );
        Ok(network)
    }

    fn shortest_paths(
        &self,
        network: &RoadNetwork,
        pairs:   &[(NodeId, NodeId)],
        weight:  EdgeWeight,
    ) -> SpatialResult<Vec<RawRoute>> {
        batch_shortest_paths(&self.router, network, pairs, weight)
    }
}
