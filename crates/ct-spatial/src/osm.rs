//! OSM PBF network provider, enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use ct_spatial::{NetworkProvider, OsmProvider};
//!
//! let provider = OsmProvider::new("santiago.osm.pbf");
//! let network = provider.build(&area)?;
//! ```
//!
//! # What is loaded
//!
//! Drivable `highway=*` ways (see [`is_drivable`]) whose nodes fall inside
//! the requested area.  A way leaving the area is cut at the boundary: only
//! consecutive node pairs with both ends inside become edges; nodes on the
//! boundary count as inside.  `oneway=yes` adds only the edge in node order,
//! `oneway=-1` only the edge against it, anything else both directions.
//!
//! Edge speeds come from the provider's [`SpeedTable`], after it has
//! observed every parsed `maxspeed` tag among the loaded ways.

use std::path::{Path, PathBuf};

use geo::{BoundingRect, Intersects, Point, Polygon};
use log::info;
use osmpbf::{Element, ElementReader};
use rustc_hash::{FxHashMap, FxHashSet};

use ct_core::{GeoPoint, NodeId};

use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::provider::{NetworkProvider, batch_shortest_paths};
use crate::router::{DijkstraRouter, EdgeWeight, RawRoute, Router};
use crate::speed::{SpeedTable, is_drivable, parse_maxspeed, travel_ms};
use crate::{SpatialError, SpatialResult};

// ── OsmProvider ───────────────────────────────────────────────────────────────

/// [`NetworkProvider`] reading a local `.osm.pbf` extract.
pub struct OsmProvider<R: Router = DijkstraRouter> {
    path:   PathBuf,
    speeds: SpeedTable,
    router: R,
}

impl OsmProvider<DijkstraRouter> {
    /// Provider with the commute speed overrides.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path:   path.as_ref().to_path_buf(),
            speeds: SpeedTable::commute_defaults(),
            router: DijkstraRouter,
        }
    }
}

impl<R: Router> OsmProvider<R> {
    pub fn with_speeds(mut self, speeds: SpeedTable) -> Self {
        self.speeds = speeds;
        self
    }

    pub fn with_router<R2: Router>(self, router: R2) -> OsmProvider<R2> {
        OsmProvider { path: self.path, speeds: self.speeds, router }
    }
}

impl<R: Router> NetworkProvider for OsmProvider<R> {
    fn build(&self, area: &Polygon<f64>) -> SpatialResult<RoadNetwork> {
        let network = load_area(&self.path, area, &self.speeds)?;
        if network.is_empty() {
            return Err(SpatialError::EmptyNetwork);
        }
        info!(
            "loaded {} nodes / {} edges from {}",
            network.node_count(),
            network.edge_count(),
            self.path.display()
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

// ── Loader ────────────────────────────────────────────────────────────────────

struct OsmWay {
    refs:     Vec<i64>,
    class:    String,
    maxspeed: Option<f64>,
    flow:     Flow,
}

/// Directions a way may be driven in, relative to its node order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Forward,
    Reverse,
    Both,
}

impl Flow {
    /// Motorways are implicitly one-way unless tagged `oneway=no`.
    pub(crate) fn from_tags(class: &str, oneway: Option<&str>) -> Self {
        match oneway {
            Some("yes" | "1" | "true") => Flow::Forward,
            Some("-1" | "reverse") => Flow::Reverse,
            Some("no" | "0" | "false") => Flow::Both,
            _ if matches!(class, "motorway" | "motorway_link") => Flow::Forward,
            _ => Flow::Both,
        }
    }

    fn forward(self) -> bool {
        self != Flow::Reverse
    }

    fn backward(self) -> bool {
        self != Flow::Forward
    }
}

fn load_area(path: &Path, area: &Polygon<f64>, speeds: &SpeedTable) -> SpatialResult<RoadNetwork> {
    let bbox = area.bounding_rect().ok_or(SpatialError::EmptyNetwork)?;
    let inside = |lat: f64, lon: f64| {
        lon >= bbox.min().x
            && lon <= bbox.max().x
            && lat >= bbox.min().y
            && lat <= bbox.max().y
            && area.intersects(&Point::new(lon, lat))
    };

    // One sequential pass: nodes inside the area plus every drivable way.
    let reader = ElementReader::from_path(path).map_err(|e| SpatialError::Osm(e.to_string()))?;
    let mut area_nodes: FxHashMap<i64, GeoPoint> = FxHashMap::default();
    let mut ways: Vec<OsmWay> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                if inside(n.lat(), n.lon()) {
                    area_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
                }
            }
            Element::DenseNode(n) => {
                if inside(n.lat(), n.lon()) {
                    area_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
                }
            }
            Element::Way(w) => {
                let tags: Vec<(&str, &str)> = w.tags().collect();
                let tag = |key: &str| tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v);
                let Some(class) = tag("highway").filter(|c| is_drivable(c)) else {
                    return;
                };
                ways.push(OsmWay {
                    refs:     w.refs().collect(),
                    class:    class.to_owned(),
                    maxspeed: tag("maxspeed").and_then(parse_maxspeed),
                    flow:     Flow::from_tags(class, tag("oneway")),
                });
            }
            _ => {}
        })
        .map_err(|e| SpatialError::Osm(e.to_string()))?;

    let mut speeds = speeds.clone();
    speeds.observe(
        ways.iter()
            .filter_map(|w| w.maxspeed.map(|kph| (w.class.as_str(), kph))),
    );

    // Only nodes referenced by a kept way become graph nodes.
    let used: FxHashSet<i64> = ways
        .iter()
        .flat_map(|w| w.refs.iter().copied())
        .filter(|id| area_nodes.contains_key(id))
        .collect();

    let mut ids: Vec<i64> = used.into_iter().collect();
    ids.sort_unstable();

    let mut builder = RoadNetworkBuilder::with_capacity(ids.len(), ids.len() * 2);
    let mut osm_to_ct: FxHashMap<i64, NodeId> =
        FxHashMap::with_capacity_and_hasher(ids.len(), Default::default());
    for osm_id in ids {
        if let Some(&pos) = area_nodes.get(&osm_id) {
            osm_to_ct.insert(osm_id, builder.add_node(pos));
        }
    }
    drop(area_nodes);

    for way in &ways {
        let kph = speeds.speed_kph(&way.class, way.maxspeed);
        for pair in way.refs.windows(2) {
            let (Some(&from), Some(&to)) = (osm_to_ct.get(&pair[0]), osm_to_ct.get(&pair[1])) else {
                continue;
            };
            let len_m = builder.node_pos(from).distance_m(builder.node_pos(to)) as f32;
            let ms = travel_ms(len_m, kph);
            if way.flow.forward() {
                builder.add_directed_edge(from, to, len_m, ms);
            }
            if way.flow.backward() {
                builder.add_directed_edge(to, from, len_m, ms);
            }
        }
    }

    Ok(builder.build())
}
