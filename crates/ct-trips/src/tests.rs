//! Unit tests for ct-trips.
//!
//! Every test runs against a hand-built 3 × 3 grid city with pinned day
//! anchor and seed, so results are exact and reproducible.

use std::sync::atomic::{AtomicUsize, Ordering};

use ct_core::{DayAnchor, GeoPoint, NodeId, SamplingRng};
use ct_spatial::{
    EdgeWeight, NetworkProvider, RawRoute, RoadNetwork, RoadNetworkBuilder, SpatialError,
    SpatialResult, StaticProvider,
};
use ct_zones::{LandUse, Zone};

use crate::{Trip, TripBatch, TripConfig, TripGenerator};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 2024-01-01T00:00:00Z.
const ANCHOR: i64 = 1_704_067_200;

const SPACING: f64 = 0.01;
const BASE_LON: f64 = -70.62;
const BASE_LAT: f64 = -33.46;

/// Position of grid cell `(row, col)`.
fn cell(row: usize, col: usize) -> GeoPoint {
    GeoPoint::new(BASE_LAT + row as f64 * SPACING, BASE_LON + col as f64 * SPACING)
}

/// 3 × 3 grid, node id = `row * 3 + col`, every neighbour pair joined by a
/// two-way road of 1 km taking 90.5 s.  Node 9 is an island far to the east.
fn grid_city() -> RoadNetwork {
    let mut b = RoadNetworkBuilder::new();
    for row in 0..3 {
        for col in 0..3 {
            b.add_node(cell(row, col));
        }
    }
    b.add_node(GeoPoint::new(BASE_LAT, BASE_LON + 0.5));

    let id = |row: usize, col: usize| NodeId((row * 3 + col) as u32);
    for row in 0..3 {
        for col in 0..3 {
            if col + 1 < 3 {
                b.add_road(id(row, col), id(row, col + 1), 1_000.0, 90_500);
            }
            if row + 1 < 3 {
                b.add_road(id(row, col), id(row + 1, col), 1_000.0, 90_500);
            }
        }
    }
    b.build()
}

fn provider() -> StaticProvider {
    StaticProvider::new(grid_city()).without_clipping()
}

/// Small square zone centred on `center`.
fn zone_at(id: u32, center: GeoPoint, land_use: LandUse, density: f64) -> Zone {
    let h = SPACING / 5.0;
    let (x, y) = (center.lon, center.lat);
    let ring = geo::LineString::from(vec![
        (x - h, y - h),
        (x + h, y - h),
        (x + h, y + h),
        (x - h, y + h),
        (x - h, y - h),
    ]);
    Zone::new(id, geo::MultiPolygon::new(vec![geo::Polygon::new(ring, vec![])]), land_use, density)
}

/// Three residential zones along the bottom row, two commercial zones in
/// the top row.
fn city_zones() -> Vec<Zone> {
    vec![
        zone_at(0, cell(0, 0), LandUse::Residential, 4.0),
        zone_at(1, cell(0, 1), LandUse::Residential, 2.0),
        zone_at(2, cell(0, 2), LandUse::Residential, 6.0),
        zone_at(3, cell(2, 0), LandUse::Commercial, 50.0),
        zone_at(4, cell(2, 2), LandUse::Commercial, 1.0),
        zone_at(5, cell(1, 1), LandUse::Other, 99.0),
    ]
}

fn config() -> TripConfig {
    TripConfig::default()
        .with_seed(42)
        .with_day_anchor(DayAnchor::new(ANCHOR))
}

fn collect(batches: impl Iterator<Item = crate::TripResult<TripBatch>>) -> Vec<TripBatch> {
    batches.map(|b| b.unwrap()).collect()
}

fn all_trips(batches: &[TripBatch]) -> Vec<Trip> {
    batches.iter().flat_map(|b| b.trips.iter().cloned()).collect()
}

fn assert_trip_invariants(trip: &Trip) {
    assert!(trip.path.len() >= 2, "path too short: {trip:?}");
    assert_eq!(trip.path.len(), trip.timestamps.len());
    assert_eq!(trip.timestamps[0], trip.start_time);
    assert!(trip.timestamps.windows(2).all(|w| w[0] <= w[1]));
}

/// Wraps a provider and fails every `shortest_paths` call after the first
/// `ok_calls`.
struct FlakyProvider {
    inner:    StaticProvider,
    ok_calls: usize,
    calls:    AtomicUsize,
}

impl NetworkProvider for FlakyProvider {
    fn build(&self, area: &geo::Polygon<f64>) -> SpatialResult<RoadNetwork> {
        self.inner.build(area)
    }

    fn shortest_paths(
        &self,
        network: &RoadNetwork,
        pairs:   &[(NodeId, NodeId)],
        weight:  EdgeWeight,
    ) -> SpatialResult<Vec<RawRoute>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) >= self.ok_calls {
            return Err(SpatialError::NodeNotFound(NodeId(1_000)));
        }
        self.inner.shortest_paths(network, pairs, weight)
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use ct_core::TimeWindow;

    use crate::{ConfigError, TripConfig};

    #[test]
    fn defaults() {
        let c = TripConfig::default();
        assert_eq!(c.trips_per_person, 2);
        assert_eq!(c.batch_size, 500);
        assert_eq!(c.departure_window.center(), 7.5);
        assert_eq!(c.return_window.center(), 18.5);
        assert_eq!(c.std_dev_hours, 1.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_bad_parameters() {
        let bad = [
            TripConfig::default().with_population_size(0),
            TripConfig::default().with_trips_per_person(0),
            TripConfig::default().with_batch_size(0),
            TripConfig { std_dev_hours: 0.0, ..TripConfig::default() },
            TripConfig::default().with_windows(TimeWindow { start_hour: 9.0, end_hour: 6.0 }, TimeWindow::EVENING),
        ];
        assert!(matches!(bad[0].validate(), Err(ConfigError::NonPositivePopulation { .. })));
        assert!(matches!(bad[1].validate(), Err(ConfigError::ZeroTripsPerPerson)));
        assert!(matches!(bad[2].validate(), Err(ConfigError::ZeroBatchSize)));
        assert!(matches!(bad[3].validate(), Err(ConfigError::InvalidStdDev(_))));
        assert!(matches!(bad[4].validate(), Err(ConfigError::Window(_))));
    }

    #[test]
    fn legs_are_clamped_to_two() {
        assert_eq!(TripConfig::default().with_trips_per_person(1).legs(), 1);
        assert_eq!(TripConfig::default().legs(), 2);
        assert_eq!(TripConfig::default().with_trips_per_person(5).legs(), 2);
    }

    #[test]
    fn deserializes_partial_json() {
        let c: TripConfig = serde_json::from_str(
            r#"{"population_size": 12, "seed": 3, "weight": "length",
                "departure_window": {"start_hour": 7, "end_hour": 10}}"#,
        )
        .unwrap();
        assert_eq!(c.population_size, Some(12));
        assert_eq!(c.seed, Some(3));
        assert_eq!(c.weight, ct_spatial::EdgeWeight::Length);
        assert_eq!(c.departure_window.center(), 8.5);
        assert_eq!(c.batch_size, 500);

        assert!(serde_json::from_str::<TripConfig>(r#"{"popultion_size": 1}"#).is_err());
    }
}

// ── PopulationSampler ─────────────────────────────────────────────────────────

#[cfg(test)]
mod sampler {
    use super::*;
    use crate::{ConfigError, PopulationSampler, default_population_size};

    fn sampler_for(config: &TripConfig) -> PopulationSampler<'_> {
        PopulationSampler::new(config, DayAnchor::new(ANCHOR))
    }

    #[test]
    fn default_size_rounds_half_to_even() {
        let one = |d: f64| vec![zone_at(0, cell(0, 0), LandUse::Residential, d)];
        assert_eq!(default_population_size(&one(2.5)), 2);
        assert_eq!(default_population_size(&one(3.5)), 4);
        assert_eq!(default_population_size(&one(2.49)), 2);
        assert_eq!(default_population_size(&one(2.51)), 3);
        assert_eq!(default_population_size(&one(0.4)), 0);
        // Commercial density never counts.
        assert_eq!(default_population_size(&city_zones()), 12);
    }

    #[test]
    fn missing_land_use_is_config_error() {
        let c = config();
        let only_res = vec![zone_at(0, cell(0, 0), LandUse::Residential, 5.0)];
        assert!(matches!(sampler_for(&c).plan(&only_res), Err(ConfigError::NoCommercialZones)));

        let only_com = vec![zone_at(0, cell(0, 0), LandUse::Commercial, 5.0)];
        assert!(matches!(sampler_for(&c).plan(&only_com), Err(ConfigError::NoResidentialZones)));
    }

    #[test]
    fn zero_density_is_non_positive_population() {
        let c = config();
        let zones = vec![
            zone_at(0, cell(0, 0), LandUse::Residential, 0.3),
            zone_at(1, cell(2, 2), LandUse::Commercial, 1.0),
        ];
        assert!(matches!(
            sampler_for(&c).plan(&zones),
            Err(ConfigError::NonPositivePopulation { .. })
        ));

        // An explicit size still needs some weight to sample origins with.
        let c = config().with_population_size(5);
        let zones = vec![
            zone_at(0, cell(0, 0), LandUse::Residential, 0.0),
            zone_at(1, cell(2, 2), LandUse::Commercial, 1.0),
        ];
        assert!(matches!(sampler_for(&c).plan(&zones), Err(ConfigError::OriginWeights(_))));
    }

    #[test]
    fn times_are_anchored_and_centred() {
        let c = config().with_population_size(4_000);
        let p = provider();
        let net = p.network();
        let plan = sampler_for(&c).plan(&city_zones()).unwrap();
        let pop = sampler_for(&c).sample(&plan, &p, net, &mut SamplingRng::new(1)).unwrap();
        assert_eq!(pop.len(), 4_000);

        for (&dep, &ret) in pop.departure_time.iter().zip(&pop.return_time) {
            // Hundredths of an hour are 36 s.
            assert_eq!((dep - ANCHOR) % 36, 0);
            assert_eq!((ret - ANCHOR) % 36, 0);
        }

        let mean_hours = |v: &[i64]| {
            v.iter().map(|&t| (t - ANCHOR) as f64 / 3_600.0).sum::<f64>() / v.len() as f64
        };
        assert!((mean_hours(&pop.departure_time) - 7.5).abs() < 0.1);
        assert!((mean_hours(&pop.return_time) - 18.5).abs() < 0.1);
    }

    #[test]
    fn origins_follow_density() {
        // Densities 4 : 2 : 6 on nodes 0, 1, 2.
        let n = 24_000;
        let c = config().with_population_size(n);
        let p = provider();
        let plan = sampler_for(&c).plan(&city_zones()).unwrap();
        let pop = sampler_for(&c).sample(&plan, &p, p.network(), &mut SamplingRng::new(9)).unwrap();

        let mut counts = [0usize; 3];
        for o in &pop.origin {
            counts[o.index()] += 1;
        }
        let expected = [4.0 / 12.0, 2.0 / 12.0, 6.0 / 12.0].map(|f| f * n as f64);
        let chi2: f64 = counts
            .iter()
            .zip(expected)
            .map(|(&obs, exp)| (obs as f64 - exp).powi(2) / exp)
            .sum();
        // 2 degrees of freedom, p = 0.001.
        assert!(chi2 < 13.82, "chi2 = {chi2}, counts = {counts:?}");
    }

    #[test]
    fn destinations_are_uniform_over_commercial_nodes() {
        let n = 20_000;
        let c = config().with_population_size(n);
        let p = provider();
        let plan = sampler_for(&c).plan(&city_zones()).unwrap();
        let pop = sampler_for(&c).sample(&plan, &p, p.network(), &mut SamplingRng::new(5)).unwrap();

        // Commercial zones sit on nodes 6 and 8; density is irrelevant.
        let at_6 = pop.destination.iter().filter(|d| d.index() == 6).count();
        let at_8 = pop.destination.iter().filter(|d| d.index() == 8).count();
        assert_eq!(at_6 + at_8, n as usize);
        let frac = at_6 as f64 / n as f64;
        assert!((frac - 0.5).abs() < 0.02, "fraction at node 6: {frac}");
    }

    #[test]
    fn same_seed_same_population() {
        let c = config().with_population_size(300);
        let p = provider();
        let plan = sampler_for(&c).plan(&city_zones()).unwrap();
        let a = sampler_for(&c).sample(&plan, &p, p.network(), &mut SamplingRng::new(77)).unwrap();
        let b = sampler_for(&c).sample(&plan, &p, p.network(), &mut SamplingRng::new(77)).unwrap();
        let other = sampler_for(&c).sample(&plan, &p, p.network(), &mut SamplingRng::new(78)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, other);
    }

    #[test]
    fn degenerate_zone_geometry_is_skipped() {
        let c = config();
        let mut zones = city_zones();
        zones.push(Zone::new(9, geo::MultiPolygon::new(vec![]), LandUse::Residential, 3.0));
        let plan = sampler_for(&c).plan(&zones).unwrap();
        assert_eq!(plan.residential_points().len(), 3);
        assert_eq!(plan.commercial_points().len(), 2);
        // Its density still counts towards the default size.
        assert_eq!(plan.population_size, 15);
    }
}

// ── TripSynthesizer ───────────────────────────────────────────────────────────

#[cfg(test)]
mod synthesizer {
    use ct_core::{Direction, PersonId};

    use super::*;
    use crate::TripSynthesizer;

    #[test]
    fn floors_cumulative_seconds() {
        let p = provider();
        let net = p.network();
        let synth = TripSynthesizer::new(&p, net);
        // 0 → 1 → 2 → 5: three edges of 90.5 s.
        let route = RawRoute::new(vec![NodeId(0), NodeId(1), NodeId(2), NodeId(5)]);
        let trip = synth.synthesize(PersonId(3), &route, 1_000, Direction::ToWork).unwrap();

        assert_eq!(trip.person_id, PersonId(3));
        assert_eq!(trip.start_time, 1_000);
        assert_eq!(trip.timestamps, vec![1_000, 1_090, 1_181, 1_271]);
        assert_eq!(trip.path[0], cell(0, 0).lon_lat());
        assert_eq!(trip.path[3], cell(1, 2).lon_lat());
        assert_eq!(trip.direction, Direction::ToWork);
        assert_eq!(trip.timestamps[3] - trip.start_time, 271);
        assert_trip_invariants(&trip);
    }

    #[test]
    fn short_or_broken_routes_yield_nothing() {
        let p = provider();
        let synth = TripSynthesizer::new(&p, p.network());
        let none = |r: RawRoute| synth.synthesize(PersonId(0), &r, 0, Direction::ToHome);

        assert!(none(RawRoute::empty()).is_none());
        assert!(none(RawRoute::new(vec![NodeId(4)])).is_none());
        // 0 and 8 are not adjacent.
        assert!(none(RawRoute::new(vec![NodeId(0), NodeId(8)])).is_none());
        // Unknown node.
        assert!(none(RawRoute::new(vec![NodeId(0), NodeId(77)])).is_none());
    }
}

// ── TripStream ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stream {
    use ct_core::Direction;

    use super::*;
    use crate::{
        CancelToken, ConfigError, NoopObserver, StreamSummary, TripError, TripObserver,
    };

    #[test]
    fn single_residential_zone_of_density_ten() {
        let zones = vec![
            zone_at(0, cell(0, 0), LandUse::Residential, 10.0),
            zone_at(1, cell(2, 2), LandUse::Commercial, 1.0),
        ];
        let stream = TripGenerator::new(provider(), config()).generate(&zones).unwrap();
        assert_eq!(stream.population().len(), 10);

        let trips = all_trips(&collect(stream));
        assert_eq!(trips.len(), 20);
        for t in &trips {
            assert_trip_invariants(t);
            // Four 1 km edges corner to corner.
            assert_eq!(t.path.len(), 5);
        }
        let to_work = trips.iter().filter(|t| t.direction == Direction::ToWork).count();
        assert_eq!(to_work, 10);
    }

    #[test]
    fn batches_are_sorted_and_bounded() {
        let c = config().with_population_size(230).with_batch_size(100);
        let stream = TripGenerator::new(provider(), c).generate(&city_zones()).unwrap();
        assert_eq!(stream.batch_count(), 3);
        let batches = collect(stream);

        assert_eq!(batches.len(), 3);
        assert_eq!(batches[2].people, 200..230);
        for (i, batch) in batches.iter().enumerate() {
            assert_eq!(batch.index, i);
            assert!(batch.trips.len() + batch.route_gaps == 2 * batch.people.len());
            assert!(batch
                .trips
                .windows(2)
                .all(|w| (w[0].person_id, w[0].start_time) <= (w[1].person_id, w[1].start_time)));
            for t in &batch.trips {
                assert!(batch.people.contains(&t.person_id.index()));
                assert_trip_invariants(t);
            }
        }
    }

    #[test]
    fn start_times_come_from_the_population() {
        let c = config().with_population_size(50);
        let mut stream = TripGenerator::new(provider(), c).generate(&city_zones()).unwrap();
        let population = stream.population().clone();
        let batch = stream.next_batch().unwrap().unwrap();
        for t in &batch.trips {
            let person = population.person(t.person_id);
            let (from, to, start) = person.leg(t.direction);
            assert_eq!(t.start_time, start);
            let net = stream.network();
            assert_eq!(t.path[0], net.node_pos[from.index()].lon_lat());
            assert_eq!(*t.path.last().unwrap(), net.node_pos[to.index()].lon_lat());
        }
    }

    #[test]
    fn emitted_plus_gaps_is_two_per_person() {
        // Half the destinations are the island node 9: every leg to or from
        // it is a route gap.
        let zones = vec![
            zone_at(0, cell(0, 0), LandUse::Residential, 40.0),
            zone_at(1, cell(2, 2), LandUse::Commercial, 1.0),
            zone_at(2, GeoPoint::new(BASE_LAT, BASE_LON + 0.5), LandUse::Commercial, 1.0),
        ];
        let stream = TripGenerator::new(provider(), config()).generate(&zones).unwrap();
        let population = stream.population().clone();
        let summary = stream.run(&mut NoopObserver).unwrap();

        let stranded = population.destination.iter().filter(|d| d.index() == 9).count();
        assert!(stranded > 0 && stranded < 40);
        assert_eq!(summary.people, 40);
        assert_eq!(summary.route_gaps, 2 * stranded);
        assert_eq!(summary.trips, 80 - 2 * stranded);
        assert!(!summary.cancelled && !summary.aborted);
    }

    #[test]
    fn origin_equal_to_destination_is_a_gap() {
        let zones = vec![
            zone_at(0, cell(1, 1), LandUse::Residential, 6.0),
            zone_at(1, cell(1, 1), LandUse::Commercial, 1.0),
        ];
        let summary = TripGenerator::new(provider(), config())
            .generate(&zones)
            .unwrap()
            .run(&mut NoopObserver)
            .unwrap();
        assert_eq!(summary.trips, 0);
        assert_eq!(summary.route_gaps, 12);
        assert_eq!(summary.batches, 1);
    }

    #[test]
    fn one_trip_per_person_routes_outbound_only() {
        let c = config().with_population_size(30).with_trips_per_person(1);
        let trips = all_trips(&collect(
            TripGenerator::new(provider(), c).generate(&city_zones()).unwrap(),
        ));
        assert_eq!(trips.len(), 30);
        assert!(trips.iter().all(|t| t.direction == Direction::ToWork));
    }

    #[test]
    fn same_seed_same_output() {
        let run = || {
            let c = config().with_population_size(120).with_batch_size(50);
            all_trips(&collect(TripGenerator::new(provider(), c).generate(&city_zones()).unwrap()))
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn batch_size_changes_chunking_only() {
        let run = |batch_size| {
            let c = config().with_population_size(250).with_batch_size(batch_size);
            collect(TripGenerator::new(provider(), c).generate(&city_zones()).unwrap())
        };
        let big = run(500);
        let small = run(100);
        assert_eq!(big.len(), 1);
        assert_eq!(small.len(), 3);
        assert_eq!(all_trips(&big), all_trips(&small));
    }

    #[test]
    fn degenerate_zones_fail_before_any_batch() {
        let zones = vec![zone_at(0, cell(0, 0), LandUse::Residential, 10.0)];
        let err = TripGenerator::new(provider(), config()).generate(&zones).err().unwrap();
        assert!(matches!(err, TripError::Config(ConfigError::NoCommercialZones)));

        let err = TripGenerator::new(provider(), config().with_batch_size(0))
            .generate(&city_zones())
            .err()
            .unwrap();
        assert!(matches!(err, TripError::Config(ConfigError::ZeroBatchSize)));
    }

    #[test]
    fn clipped_network_outside_zones_is_provider_error() {
        // The clipping provider keeps only nodes near the zones; zones far
        // away from the grid leave nothing.
        let zones = vec![
            zone_at(0, GeoPoint::new(10.0, 10.0), LandUse::Residential, 3.0),
            zone_at(1, GeoPoint::new(10.0, 10.01), LandUse::Commercial, 1.0),
        ];
        let err = TripGenerator::new(StaticProvider::new(grid_city()), config())
            .generate(&zones)
            .err()
            .unwrap();
        assert!(matches!(err, TripError::Provider(SpatialError::EmptyNetwork)));
    }

    #[test]
    fn cancelling_after_first_batch_yields_exactly_one() {
        let token = CancelToken::new();
        let c = config().with_population_size(30).with_batch_size(10);
        let mut stream = TripGenerator::new(provider(), c)
            .cancel_token(token.clone())
            .generate(&city_zones())
            .unwrap();

        assert!(stream.next_batch().unwrap().is_ok());
        token.cancel();
        assert!(stream.next_batch().is_none());
        assert!(stream.next().is_none());
        let summary = stream.summary();
        assert_eq!(summary.batches, 1);
        assert!(summary.cancelled);
    }

    #[test]
    fn observer_can_cancel_push_stream() {
        struct StopAfterFirst {
            token:   CancelToken,
            batches: usize,
            end:     Option<StreamSummary>,
        }
        impl TripObserver for StopAfterFirst {
            fn on_batch(&mut self, _batch: &TripBatch) {
                self.batches += 1;
                self.token.cancel();
            }
            fn on_stream_end(&mut self, summary: &StreamSummary) {
                self.end = Some(*summary);
            }
        }

        let c = config().with_population_size(30).with_batch_size(10);
        let stream = TripGenerator::new(provider(), c).generate(&city_zones()).unwrap();
        let mut obs = StopAfterFirst { token: stream.cancel_token(), batches: 0, end: None };
        let summary = stream.run(&mut obs).unwrap();

        assert_eq!(obs.batches, 1);
        assert_eq!(summary.batches, 1);
        assert!(summary.cancelled);
        assert_eq!(obs.end, Some(summary));
    }

    #[test]
    fn provider_failure_mid_stream_ends_with_one_error() {
        // Two legs per batch: calls 0 and 1 succeed, batch 2 fails.
        let flaky = FlakyProvider { inner: provider(), ok_calls: 2, calls: AtomicUsize::new(0) };
        let c = config().with_population_size(30).with_batch_size(10);
        let mut stream = TripGenerator::new(flaky, c).generate(&city_zones()).unwrap();

        assert!(stream.next_batch().unwrap().is_ok());
        assert!(matches!(stream.next_batch(), Some(Err(TripError::Provider(_)))));
        assert!(stream.next_batch().is_none());
        assert!(stream.summary().aborted);
        assert_eq!(stream.summary().batches, 1);
    }

    #[test]
    fn provider_failure_reaches_push_observer() {
        #[derive(Default)]
        struct Record {
            batches: usize,
            end:     Option<StreamSummary>,
        }
        impl TripObserver for Record {
            fn on_batch(&mut self, _batch: &TripBatch) {
                self.batches += 1;
            }
            fn on_stream_end(&mut self, summary: &StreamSummary) {
                self.end = Some(*summary);
            }
        }

        let flaky = FlakyProvider { inner: provider(), ok_calls: 4, calls: AtomicUsize::new(0) };
        let c = config().with_population_size(30).with_batch_size(10);
        let stream = TripGenerator::new(flaky, c).generate(&city_zones()).unwrap();
        let mut rec = Record::default();
        assert!(stream.run(&mut rec).is_err());
        assert_eq!(rec.batches, 2);
        let end = rec.end.unwrap();
        assert!(end.aborted);
        assert_eq!(end.batches, 2);
    }

    #[test]
    fn trip_json_shape() {
        let c = config().with_population_size(1).with_trips_per_person(1);
        let mut stream = TripGenerator::new(provider(), c).generate(&city_zones()).unwrap();
        let batch = stream.next_batch().unwrap().unwrap();
        let v = serde_json::to_value(&batch.trips[0]).unwrap();
        let obj = v.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["path", "start_time", "timestamps", "type"]);
        assert_eq!(obj["type"], "to_work");
        assert!(obj["path"][0].as_array().unwrap().len() == 2);
    }
}
