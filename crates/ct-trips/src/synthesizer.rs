//! Raw route + start time → timestamped [`Trip`].

use log::debug;

use ct_core::{Direction, PersonId};
use ct_spatial::{NetworkProvider, RawRoute, RoadNetwork};

use crate::trip::Trip;

/// Converts routes into trips using the provider's edge travel times and
/// node coordinates.
///
/// Point `i` is reached at `start_time + floor(sum of the first i edge
/// times)`, so timestamps never decrease and the first equals the start.
pub struct TripSynthesizer<'a, P: NetworkProvider> {
    provider: &'a P,
    network:  &'a RoadNetwork,
}

impl<'a, P: NetworkProvider> TripSynthesizer<'a, P> {
    pub fn new(provider: &'a P, network: &'a RoadNetwork) -> Self {
        Self { provider, network }
    }

    /// `None` for routes with fewer than two nodes, and when the provider
    /// cannot supply travel times or coordinates for the route.
    pub fn synthesize(
        &self,
        person_id:  PersonId,
        route:      &RawRoute,
        start_time: i64,
        direction:  Direction,
    ) -> Option<Trip> {
        if !route.is_usable() {
            return None;
        }

        let edge_secs = match self.provider.edge_travel_times(self.network, route) {
            Ok(secs) if secs.len() + 1 == route.len() => secs,
            Ok(secs) => {
                debug!(
                    "{person_id}: {} edge times for a {}-node route; trip dropped",
                    secs.len(),
                    route.len()
                );
                return None;
            }
            Err(e) => {
                debug!("{person_id}: travel times unavailable ({e}); trip dropped");
                return None;
            }
        };

        let mut path = Vec::with_capacity(route.len());
        for &node in &route.nodes {
            match self.provider.node_position(self.network, node) {
                Ok(pos) => path.push(pos.lon_lat()),
                Err(e) => {
                    debug!("{person_id}: {e}; trip dropped");
                    return None;
                }
            }
        }

        let mut timestamps = Vec::with_capacity(route.len());
        timestamps.push(start_time);
        let mut elapsed = 0.0_f64;
        for secs in edge_secs {
            elapsed += secs.max(0.0);
            timestamps.push(start_time + elapsed.floor() as i64);
        }

        Some(Trip { person_id, start_time, path, timestamps, direction })
    }
}
