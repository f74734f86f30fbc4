//! Output records: one [`Trip`] per routed leg, grouped into [`TripBatch`]es.

use std::ops::Range;

use serde::Serialize;

use ct_core::{Direction, PersonId};

/// A timestamped vehicle path.
///
/// Serializes as `{start_time, path, timestamps, type}`; `person_id` is kept
/// for ordering and tabular sinks but not written to JSON.
///
/// Invariants: `path.len() == timestamps.len() >= 2`, timestamps are
/// non-decreasing and `timestamps[0] == start_time`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trip {
    #[serde(skip)]
    pub person_id: PersonId,
    /// Unix seconds.
    pub start_time: i64,
    /// `[lon, lat]` of every node along the route.
    pub path: Vec<[f64; 2]>,
    /// Unix seconds at which each `path` point is reached.
    pub timestamps: Vec<i64>,
    #[serde(rename = "type")]
    pub direction: Direction,
}

/// All trips of one batch of people, sorted by `(person_id, start_time)`.
#[derive(Clone, Debug, PartialEq)]
pub struct TripBatch {
    /// Zero-based batch number.
    pub index: usize,
    /// People `people.start..people.end` were routed in this batch.
    pub people: Range<usize>,
    pub trips: Vec<Trip>,
    /// Legs of this batch that produced no trip.
    pub route_gaps: usize,
}

impl TripBatch {
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}
