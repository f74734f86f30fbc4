//! Fixed-size batching and per-batch routing.

use std::ops::Range;

use ct_core::{Direction, NodeId};
use ct_spatial::{EdgeWeight, NetworkProvider, RawRoute, RoadNetwork};

use crate::population::Population;
use crate::{TripError, TripResult};

/// Origin/destination pairs of one batch in one direction, in ascending
/// person order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteQuery {
    pub direction: Direction,
    pub people:    Range<usize>,
    pub pairs:     Vec<(NodeId, NodeId)>,
}

impl RouteQuery {
    pub fn new(population: &Population, people: Range<usize>, direction: Direction) -> Self {
        let pairs = population.pairs(people.clone(), direction);
        Self { direction, people, pairs }
    }
}

/// Routes of one batch, aligned with `people`.
#[derive(Clone, Debug)]
pub struct RoutedBatch {
    pub people: Range<usize>,
    /// One entry per routed direction, in [`Direction::BOTH`] order.
    pub legs:   Vec<(Direction, Vec<RawRoute>)>,
}

const OUTBOUND_ONLY: &[Direction] = &[Direction::ToWork];
const BOTH_LEGS: &[Direction] = &Direction::BOTH;

/// Issues the per-direction shortest-path queries for a batch.
pub struct BatchRouter<'a, P: NetworkProvider> {
    provider:   &'a P,
    network:    &'a RoadNetwork,
    weight:     EdgeWeight,
    directions: &'static [Direction],
}

impl<'a, P: NetworkProvider> BatchRouter<'a, P> {
    /// `legs` is 1 (outbound only) or 2 (outbound and return).
    pub fn new(provider: &'a P, network: &'a RoadNetwork, weight: EdgeWeight, legs: usize) -> Self {
        let directions = if legs >= 2 { BOTH_LEGS } else { OUTBOUND_ONLY };
        Self { provider, network, weight, directions }
    }

    /// One provider call per direction.  A provider failure fails the whole
    /// batch; so does a result whose length does not match the query.
    pub fn route_batch(&self, population: &Population, people: Range<usize>) -> TripResult<RoutedBatch> {
        let mut legs = Vec::with_capacity(self.directions.len());
        for &direction in self.directions {
            let query = RouteQuery::new(population, people.clone(), direction);
            let routes = self.run(&query)?;
            legs.push((direction, routes));
        }
        Ok(RoutedBatch { people, legs })
    }

    pub fn run(&self, query: &RouteQuery) -> TripResult<Vec<RawRoute>> {
        let routes = self.provider.shortest_paths(self.network, &query.pairs, self.weight)?;
        if routes.len() != query.pairs.len() {
            return Err(TripError::RouteCountMismatch {
                direction: query.direction,
                expected:  query.pairs.len(),
                got:       routes.len(),
            });
        }
        Ok(routes)
    }
}
