//! Run parameters for one trip-generation run.

use serde::Deserialize;

use ct_core::{DayAnchor, TimeWindow};
use ct_spatial::EdgeWeight;

use crate::ConfigError;

/// Default number of people routed per batch.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Parameters of a trip-generation run.
///
/// Every field has a default, so a JSON config file only needs the keys it
/// changes:
///
/// ```json
/// { "population_size": 2000, "seed": 42, "departure_window": { "start_hour": 7, "end_hour": 10 } }
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TripConfig {
    /// Number of people to sample.  `None` derives it from the summed
    /// residential density.
    pub population_size: Option<u32>,

    /// Commute legs per person: 1 routes only home → work, 2 (the default)
    /// adds work → home.  Larger values are clamped to 2.
    pub trips_per_person: u32,

    /// Window whose midpoint centres the departure-time distribution.
    pub departure_window: TimeWindow,

    /// Window whose midpoint centres the return-time distribution.
    pub return_window: TimeWindow,

    /// Standard deviation of both time distributions, in hours.
    pub std_dev_hours: f64,

    /// People per routing batch.
    pub batch_size: usize,

    /// Seed of the sampling RNG.  `None` seeds from entropy and logs the
    /// chosen seed.
    pub seed: Option<u64>,

    /// Unix seconds of the midnight drawn hours are added to.  `None` uses
    /// local midnight of the current day.
    pub day_anchor: Option<i64>,

    /// Edge attribute minimised by the shortest-path queries.
    pub weight: EdgeWeight,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            population_size:  None,
            trips_per_person: 2,
            departure_window: TimeWindow::MORNING,
            return_window:    TimeWindow::EVENING,
            std_dev_hours:    1.0,
            batch_size:       DEFAULT_BATCH_SIZE,
            seed:             None,
            day_anchor:       None,
            weight:           EdgeWeight::TravelTime,
        }
    }
}

impl TripConfig {
    pub fn with_population_size(mut self, size: u32) -> Self {
        self.population_size = Some(size);
        self
    }

    pub fn with_trips_per_person(mut self, trips: u32) -> Self {
        self.trips_per_person = trips;
        self
    }

    pub fn with_windows(mut self, departure: TimeWindow, ret: TimeWindow) -> Self {
        self.departure_window = departure;
        self.return_window = ret;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_day_anchor(mut self, anchor: DayAnchor) -> Self {
        self.day_anchor = Some(anchor.midnight_unix_secs);
        self
    }

    /// Check every parameter that can be checked without zones.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == Some(0) {
            return Err(ConfigError::NonPositivePopulation { density_sum: 0.0 });
        }
        if self.trips_per_person == 0 {
            return Err(ConfigError::ZeroTripsPerPerson);
        }
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if !(self.std_dev_hours.is_finite() && self.std_dev_hours > 0.0) {
            return Err(ConfigError::InvalidStdDev(self.std_dev_hours));
        }
        self.departure_window.validate()?;
        self.return_window.validate()?;
        Ok(())
    }

    /// Legs actually routed per person.
    #[inline]
    pub fn legs(&self) -> usize {
        self.trips_per_person.min(2) as usize
    }
}
