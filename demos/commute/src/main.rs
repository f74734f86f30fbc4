//! commute: one day of home ↔ work car trips for a zoning layer.
//!
//! ```text
//! commute zones.geojson --seed 7 --format json -o trips.jsonl
//! commute zones.geojson --config run.json --format csv -o points.csv
//! commute zones.geojson --osm santiago.osm.pbf        # with --features osm
//! ```
//!
//! Without `--osm` the road network is a synthetic street grid over the
//! zones' bounding box.

mod network;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};

use ct_output::{CsvWriter, JsonLinesWriter, StreamOutputObserver, TripWriter};
use ct_spatial::{NetworkProvider, StaticProvider};
use ct_trips::{StreamSummary, TripConfig, TripGenerator};
use ct_zones::{Zone, load_zones_geojson};

use network::grid_network;

// ── CLI definition ────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    /// One JSON array of trips per batch
    Json,
    /// One row per trip point
    Csv,
}

#[derive(Parser)]
#[command(
    name = "commute",
    about = "Generate synthetic home-work car trips for a set of land-use zones"
)]
struct Cli {
    /// GeoJSON FeatureCollection of zones
    zones: PathBuf,

    /// JSON file with a trip configuration (unknown keys are rejected)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of people (default: rounded residential density sum)
    #[arg(long)]
    population: Option<u32>,

    /// Legs per person: 1 = to work only, 2 = to work and back home
    #[arg(long)]
    trips_per_person: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    batch_size: Option<usize>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// OSM PBF extract to build the road network from (needs the `osm` feature)
    #[arg(long)]
    osm: Option<PathBuf>,
}

impl Cli {
    fn trip_config(&self) -> Result<TripConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str::<TripConfig>(&raw)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => TripConfig::default(),
        };
        if let Some(n) = self.population {
            config = config.with_population_size(n);
        }
        if let Some(n) = self.trips_per_person {
            config = config.with_trips_per_person(n);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(n) = self.batch_size {
            config = config.with_batch_size(n);
        }
        Ok(config)
    }

    fn sink(&self) -> Result<Box<dyn Write>> {
        Ok(match &self.output {
            Some(path) => Box::new(
                fs::File::create(path).with_context(|| format!("creating {}", path.display()))?,
            ),
            None => Box::new(io::stdout().lock()),
        })
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.trip_config()?;
    let zones = load_zones(&cli.zones)?;
    run(&cli, config, &zones)
}

#[cfg(feature = "osm")]
fn run(cli: &Cli, config: TripConfig, zones: &[Zone]) -> Result<()> {
    match &cli.osm {
        Some(pbf) => generate(cli, ct_spatial::OsmProvider::new(pbf), config, zones),
        None => run_on_grid(cli, config, zones),
    }
}

#[cfg(not(feature = "osm"))]
fn run(cli: &Cli, config: TripConfig, zones: &[Zone]) -> Result<()> {
    if cli.osm.is_some() {
        anyhow::bail!("--osm requires building with `--features osm`");
    }
    run_on_grid(cli, config, zones)
}

fn run_on_grid(cli: &Cli, config: TripConfig, zones: &[Zone]) -> Result<()> {
    let grid = grid_network(zones)?;
    info!("synthetic grid: {} nodes, {} edges", grid.node_count(), grid.edge_count());
    generate(cli, StaticProvider::new(grid), config, zones)
}

fn load_zones(path: &Path) -> Result<Vec<Zone>> {
    let zones = load_zones_geojson(path).with_context(|| format!("loading zones {}", path.display()))?;
    let residential = zones.iter().filter(|z| z.is_residential()).count();
    let commercial = zones.iter().filter(|z| z.is_commercial()).count();
    info!("{} zones ({residential} residential, {commercial} commercial)", zones.len());
    Ok(zones)
}

fn generate<P: NetworkProvider>(cli: &Cli, provider: P, config: TripConfig, zones: &[Zone]) -> Result<()> {
    let out = cli.sink()?;
    let summary = match cli.format {
        Format::Json => stream_into(provider, config, zones, JsonLinesWriter::new(out))?,
        Format::Csv => stream_into(provider, config, zones, CsvWriter::new(out)?)?,
    };

    if summary.route_gaps > 0 {
        warn!("{} legs had no route and were skipped", summary.route_gaps);
    }
    Ok(())
}

fn stream_into<P: NetworkProvider, W: TripWriter>(
    provider: P,
    config:   TripConfig,
    zones:    &[Zone],
    writer:   W,
) -> Result<StreamSummary> {
    let t0 = Instant::now();
    let stream = TripGenerator::new(provider, config).generate(zones)?;
    info!("{} people in {} batches", stream.population().len(), stream.batch_count());

    let mut obs = StreamOutputObserver::new(writer);
    let summary = stream.run(&mut obs)?;
    if let Some(e) = obs.take_error() {
        return Err(e).context("writing trips");
    }

    info!(
        "done in {:.2?}: {} trips for {} people ({} batches written)",
        t0.elapsed(),
        summary.trips,
        summary.people,
        obs.batches_written()
    );
    Ok(summary)
}
