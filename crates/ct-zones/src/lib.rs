//! `ct-zones`: land-use zones, GeoJSON loading, and the area of interest.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`zone`]   | `Zone`, `LandUse`, `residential_density`                  |
//! | [`loader`] | `load_zones_geojson`, `load_zones_reader`, `ZoneFields`   |
//! | [`area`]   | `area_of_interest`, `zones_bounds`, `AREA_BUFFER_DEG`     |
//! | [`error`]  | `ZoneError`, `ZoneResult<T>`                              |
//!
//! Zones are loaded once per run and never mutated.  Residential zones are
//! trip origins weighted by density; commercial zones are destinations.

pub mod area;
pub mod error;
pub mod loader;
pub mod zone;


pub use area::{AREA_BUFFER_DEG, area_of_interest, zones_bounds};
pub use error::{ZoneError, ZoneResult};
pub use loader::{ZoneFields, load_zones_geojson, load_zones_reader, load_zones_str};
pub use zone::{LandUse, Zone, residential_density};
