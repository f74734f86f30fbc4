//! Synthetic street grid used when no OSM extract is given.
//!
//! Covers the zones' bounding box with a square lattice of two-way
//! residential streets, roughly one intersection every 550 m.

use ct_core::{GeoPoint, NodeId};
use ct_spatial::speed::{default_kph, travel_ms};
use ct_spatial::{RoadNetwork, RoadNetworkBuilder};
use ct_zones::{AREA_BUFFER_DEG, Zone, ZoneResult, zones_bounds};

/// Grid spacing in degrees.
pub const GRID_STEP_DEG: f64 = 0.005;

/// Build a grid network over the buffered bounds of `zones`.
pub fn grid_network(zones: &[Zone]) -> ZoneResult<RoadNetwork> {
    let bounds = zones_bounds(zones, AREA_BUFFER_DEG)?;
    let (min, max) = (bounds.min(), bounds.max());
    let cols = ((max.x - min.x) / GRID_STEP_DEG).ceil() as usize + 1;
    let rows = ((max.y - min.y) / GRID_STEP_DEG).ceil() as usize + 1;
    let kph = default_kph("residential");

    let mut b = RoadNetworkBuilder::with_capacity(rows * cols, 4 * rows * cols);
    let mut ids: Vec<NodeId> = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let lat = min.y + r as f64 * GRID_STEP_DEG;
            let lon = min.x + c as f64 * GRID_STEP_DEG;
            ids.push(b.add_node(GeoPoint::new(lat, lon)));
        }
    }

    let road = |b: &mut RoadNetworkBuilder, a: NodeId, z: NodeId| {
        let length_m = b.node_pos(a).distance_m(b.node_pos(z)) as f32;
        b.add_road(a, z, length_m, travel_ms(length_m, kph));
    };
    for r in 0..rows {
        for c in 0..cols {
            let here = ids[r * cols + c];
            if c + 1 < cols {
                road(&mut b, here, ids[r * cols + c + 1]);
            }
            if r + 1 < rows {
                road(&mut b, here, ids[(r + 1) * cols + c]);
            }
        }
    }
    Ok(b.build())
}
