//! `ct-core`: foundational types for the commute-trips workspace.
//!
//! This crate is a dependency of every other `ct-*` crate.  It has no `ct-*`
//! dependencies and few external ones (`rand`, `thiserror`, `chrono`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PersonId`, `NodeId`, `EdgeId`                        |
//! | [`geo`]         | `GeoPoint`, haversine distance                        |
//! | [`time`]        | `TimeWindow`, `DayAnchor`                             |
//! | [`rng`]         | `SamplingRng` (injectable, seeded)                    |
//! | [`direction`]   | `Direction` enum (`to_work` / `to_home`)              |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod direction;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{EdgeId, NodeId, PersonId};
pub use rng::SamplingRng;
pub use time::{DayAnchor, TimeWindow};
