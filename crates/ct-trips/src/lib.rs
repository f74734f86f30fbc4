//! `ct-trips`: synthetic home ↔ work commute trips.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`config`]      | `TripConfig` (serde, builder setters, `validate`)          |
//! | [`sampler`]     | `PopulationSampler`, `SamplingPlan`, `default_population_size` |
//! | [`population`]  | `Population` (SoA), `SampledPerson`                        |
//! | [`batch`]       | `BatchRouter`, `RouteQuery`, `RoutedBatch`                 |
//! | [`synthesizer`] | `TripSynthesizer`                                          |
//! | [`trip`]        | `Trip`, `TripBatch`                                        |
//! | [`stream`]      | `TripStream`, `TripObserver`, `CancelToken`, `StreamSummary` |
//! | [`builder`]     | `TripGenerator`                                            |
//! | [`error`]       | `ConfigError`, `TripError`, `TripResult<T>`                |
//!
//! # Pipeline
//!
//! ```text
//! zones ─► PopulationSampler ─► Population
//!                                   │  (batches of batch_size people)
//!                                   ▼
//!                             BatchRouter ─► NetworkProvider::shortest_paths
//!                                   │
//!                                   ▼
//!                           TripSynthesizer ─► TripBatch ─► consumer
//! ```
//!
//! Batches are processed strictly in order; the only parallelism is inside
//! the provider's batched shortest-path call.

pub mod batch;
pub mod builder;
pub mod config;
pub mod error;
pub mod population;
pub mod sampler;
pub mod stream;
pub mod synthesizer;
pub mod trip;

#[cfg(test)]
mod tests;

pub use batch::{BatchRouter, RouteQuery, RoutedBatch};
pub use builder::TripGenerator;
pub use config::{DEFAULT_BATCH_SIZE, TripConfig};
pub use error::{ConfigError, TripError, TripResult};
pub use population::{Population, SampledPerson};
pub use sampler::{PopulationSampler, SamplingPlan, default_population_size};
pub use stream::{CancelToken, NoopObserver, StreamSummary, TripObserver, TripStream};
pub use synthesizer::TripSynthesizer;
pub use trip::{Trip, TripBatch};
