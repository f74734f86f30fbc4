//! `ct-spatial`: road network, nearest-node snapping, and routing providers.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`network`]  | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`            |
//! | [`router`]   | `Router` trait, `RawRoute`, `EdgeWeight`, `DijkstraRouter`    |
//! | [`provider`] | `NetworkProvider` trait, `StaticProvider`, `batch_shortest_paths` |
//! | [`speed`]    | `SpeedTable` and `maxspeed` parsing for travel-time imputation |
//! | [`osm`]      | `OsmProvider` (feature = `"osm"` only)                        |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                       |
//! |------------|--------------------------------------------------------------|
//! | `osm`      | Enables the OSM PBF provider via the `osmpbf` crate.         |
//! | `parallel` | Batched shortest-path queries fan out over Rayon.            |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod network;
pub mod provider;
pub mod router;
pub mod speed;

#[cfg(feature = "osm")]
pub mod osm;


pub use error::{SpatialError, SpatialResult};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use provider::{NetworkProvider, StaticProvider, batch_shortest_paths};
pub use router::{DijkstraRouter, EdgeWeight, RawRoute, Router};
pub use speed::SpeedTable;

#[cfg(feature = "osm")]
pub use osm::OsmProvider;
