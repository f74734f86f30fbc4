//! Entry point: zones + provider + config → [`TripStream`].

use std::time::Instant;

use log::{info, warn};

use ct_core::{DayAnchor, SamplingRng};
use ct_spatial::NetworkProvider;
use ct_zones::{Zone, area_of_interest};

use crate::config::TripConfig;
use crate::sampler::PopulationSampler;
use crate::stream::{CancelToken, TripStream};
use crate::TripResult;

/// Builds a ready-to-consume [`TripStream`].
///
/// # Steps
///
/// 1. validate the config and classify the zones (configuration errors
///    surface here, before any network work);
/// 2. build the road network for the zones' area of interest;
/// 3. sample the population;
/// 4. hand everything to a [`TripStream`].
///
/// # Example
///
/// ```rust,ignore
/// let zones = load_zones_geojson(Path::new("zones.geojson"))?;
/// let provider = OsmProvider::new("santiago.osm.pbf");
/// let stream = TripGenerator::new(provider, TripConfig::default().with_seed(7))
///     .generate(&zones)?;
/// for batch in stream {
///     let batch = batch?;
///     // ...
/// }
/// ```
pub struct TripGenerator<P: NetworkProvider> {
    provider: P,
    config:   TripConfig,
    cancel:   Option<CancelToken>,
}

impl<P: NetworkProvider> TripGenerator<P> {
    pub fn new(provider: P, config: TripConfig) -> Self {
        Self { provider, config, cancel: None }
    }

    /// Share `token` with the stream this generator produces.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &TripConfig {
        &self.config
    }

    /// Generate with an RNG seeded from `config.seed` (or entropy).
    pub fn generate(self, zones: &[Zone]) -> TripResult<TripStream<P>> {
        let mut rng = SamplingRng::seeded_or_entropy(self.config.seed);
        if self.config.seed.is_none() {
            info!("no seed configured; sampling with seed {}", rng.seed());
        }
        self.generate_with_rng(zones, &mut rng)
    }

    /// Generate drawing from a caller-supplied RNG.
    pub fn generate_with_rng(self, zones: &[Zone], rng: &mut SamplingRng) -> TripResult<TripStream<P>> {
        let config = self.config;
        config.validate()?;
        if config.trips_per_person > 2 {
            warn!(
                "trips_per_person = {} but only the to_work and to_home legs exist; routing 2",
                config.trips_per_person
            );
        }

        let anchor = match config.day_anchor {
            Some(secs) => DayAnchor::new(secs),
            None => DayAnchor::today_local()?,
        };
        let sampler = PopulationSampler::new(&config, anchor);
        let plan = sampler.plan(zones)?;

        info!(
            "generating trips: {} people, {} legs each, batch size {}, seed {}",
            plan.population_size,
            config.legs(),
            config.batch_size,
            rng.seed()
        );

        let t0 = Instant::now();
        let area = area_of_interest(zones)?;
        let network = self.provider.build(&area)?;
        info!(
            "road network: {} nodes, {} edges in {:.2?}",
            network.node_count(),
            network.edge_count(),
            t0.elapsed()
        );

        let population = sampler.sample(&plan, &self.provider, &network, rng)?;

        let stream = TripStream::new(
            self.provider,
            network,
            population,
            config.weight,
            config.legs(),
            config.batch_size,
        );
        Ok(match self.cancel {
            Some(token) => stream.with_cancel_token(token),
            None => stream,
        })
    }
}
