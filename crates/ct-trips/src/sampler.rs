//! Population sampling: who travels, from where, to where, and when.
//!
//! Sampling is split in two so configuration problems surface before the
//! (expensive) network build:
//!
//! 1. [`PopulationSampler::plan`] classifies zones, computes centroids,
//!    resolves the population size and prepares origin weights.  Pure; only
//!    fails with [`ConfigError`].
//! 2. [`PopulationSampler::sample`] snaps centroids to graph nodes and makes
//!    every random draw.
//!
//! # Draw order
//!
//! All draws come from the caller's [`SamplingRng`] in a fixed order:
//! every departure time, then every return time, then every origin, then
//! every destination.  Same seed + same zones + same network ⇒ same
//! population.

use std::time::Instant;

use log::{info, warn};
use rand::distributions::WeightedIndex;
use rand_distr::{Distribution, Normal};

use ct_core::{DayAnchor, GeoPoint, NodeId, SamplingRng, TimeWindow};
use ct_spatial::{NetworkProvider, RoadNetwork};
use ct_zones::{Zone, residential_density};

use crate::config::TripConfig;
use crate::population::Population;
use crate::{ConfigError, TripResult};

/// Population size implied by the zones: the summed residential density
/// rounded to the nearest integer, ties to even (2.5 → 2, 3.5 → 4).
pub fn default_population_size(zones: &[Zone]) -> u32 {
    let rounded = residential_density(zones).round_ties_even();
    if rounded <= 0.0 { 0 } else { rounded.min(u32::MAX as f64) as u32 }
}

/// Drawn hour offsets are kept to two decimals (36 s resolution).
#[inline]
fn round_centi_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

// ── SamplingPlan ──────────────────────────────────────────────────────────────

/// Zone classification and weights for one run; see
/// [`PopulationSampler::plan`].
#[derive(Debug, Clone)]
pub struct SamplingPlan {
    pub population_size: u32,
    /// Centroids of the residential zones, aligned with `origin_weights`.
    residential: Vec<GeoPoint>,
    commercial:  Vec<GeoPoint>,
    origin_weights: WeightedIndex<f64>,
}

impl SamplingPlan {
    pub fn residential_points(&self) -> &[GeoPoint] {
        &self.residential
    }

    pub fn commercial_points(&self) -> &[GeoPoint] {
        &self.commercial
    }
}

// ── PopulationSampler ─────────────────────────────────────────────────────────

pub struct PopulationSampler<'c> {
    config: &'c TripConfig,
    anchor: DayAnchor,
}

impl<'c> PopulationSampler<'c> {
    pub fn new(config: &'c TripConfig, anchor: DayAnchor) -> Self {
        Self { config, anchor }
    }

    /// Classify zones and resolve the population size.
    ///
    /// Zones whose geometry has no centroid are skipped with a warning.
    pub fn plan(&self, zones: &[Zone]) -> Result<SamplingPlan, ConfigError> {
        let mut residential = Vec::new();
        let mut densities = Vec::new();
        let mut commercial = Vec::new();

        for zone in zones {
            if !(zone.is_residential() || zone.is_commercial()) {
                continue;
            }
            let Some(point) = zone.representative_point() else {
                warn!("zone {} ({}) has no centroid; skipped", zone.id, zone.land_use);
                continue;
            };
            if zone.is_residential() {
                residential.push(point);
                densities.push(zone.density);
            } else {
                commercial.push(point);
            }
        }

        if residential.is_empty() {
            return Err(ConfigError::NoResidentialZones);
        }
        if commercial.is_empty() {
            return Err(ConfigError::NoCommercialZones);
        }

        let population_size = match self.config.population_size {
            Some(n) => n,
            None => default_population_size(zones),
        };
        if population_size == 0 {
            return Err(ConfigError::NonPositivePopulation {
                density_sum: residential_density(zones),
            });
        }

        let origin_weights = WeightedIndex::new(densities)?;

        Ok(SamplingPlan { population_size, residential, commercial, origin_weights })
    }

    /// Snap the plan's centroids to `network` and draw the population.
    pub fn sample<P: NetworkProvider>(
        &self,
        plan:     &SamplingPlan,
        provider: &P,
        network:  &RoadNetwork,
        rng:      &mut SamplingRng,
    ) -> TripResult<Population> {
        let t0 = Instant::now();
        let n = plan.population_size as usize;

        let origin_nodes = snap_all(provider, network, &plan.residential)?;
        let destination_nodes = snap_all(provider, network, &plan.commercial)?;

        let departure_time = self.draw_times(self.config.departure_window, n, rng)?;
        let return_time = self.draw_times(self.config.return_window, n, rng)?;

        let origin: Vec<NodeId> = (0..n)
            .map(|_| origin_nodes[plan.origin_weights.sample(rng.inner())])
            .collect();
        let destination: Vec<NodeId> = (0..n)
            .map(|_| destination_nodes[rng.gen_range(0..destination_nodes.len())])
            .collect();

        info!(
            "sampled {} people ({} origin zones, {} destination zones) in {:.2?}",
            n,
            origin_nodes.len(),
            destination_nodes.len(),
            t0.elapsed()
        );

        Ok(Population { origin, destination, departure_time, return_time })
    }

    fn draw_times(
        &self,
        window: TimeWindow,
        n:      usize,
        rng:    &mut SamplingRng,
    ) -> Result<Vec<i64>, ConfigError> {
        let std_dev = self.config.std_dev_hours;
        let normal = Normal::new(window.center(), std_dev)
            .map_err(|_| ConfigError::InvalidStdDev(std_dev))?;
        Ok((0..n)
            .map(|_| self.anchor.at_hours(round_centi_hours(normal.sample(rng.inner()))))
            .collect())
    }
}

fn snap_all<P: NetworkProvider>(
    provider: &P,
    network:  &RoadNetwork,
    points:   &[GeoPoint],
) -> TripResult<Vec<NodeId>> {
    points
        .iter()
        .map(|&p| provider.nearest_node(network, p).map_err(Into::into))
        .collect()
}
