use rand::distributions::WeightedError;
use thiserror::Error;

use ct_core::{CoreError, Direction};
use ct_spatial::SpatialError;
use ct_zones::ZoneError;

/// Invalid run parameters or zone classification.  Always raised before the
/// first batch is produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no RESIDENTIAL zones with a usable centroid")]
    NoResidentialZones,

    #[error("no COMMERCIAL zones with a usable centroid")]
    NoCommercialZones,

    #[error("population size must be positive (residential density sums to {density_sum})")]
    NonPositivePopulation { density_sum: f64 },

    #[error("trips_per_person must be at least 1")]
    ZeroTripsPerPerson,

    #[error("batch_size must be at least 1")]
    ZeroBatchSize,

    #[error("time standard deviation must be finite and positive, got {0}")]
    InvalidStdDev(f64),

    #[error("invalid time window: {0}")]
    Window(#[from] CoreError),

    #[error("residential densities cannot weight origins: {0}")]
    OriginWeights(#[from] WeightedError),
}

#[derive(Debug, Error)]
pub enum TripError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("network provider error: {0}")]
    Provider(#[from] SpatialError),

    #[error("zone error: {0}")]
    Zones(#[from] ZoneError),

    #[error("day anchor error: {0}")]
    DayAnchor(#[from] CoreError),

    #[error("provider returned {got} {direction} routes for {expected} queries")]
    RouteCountMismatch {
        direction: Direction,
        expected:  usize,
        got:       usize,
    },
}

pub type TripResult<T> = Result<T, TripError>;
