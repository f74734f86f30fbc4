//! Flat row type for tabular sinks.

use ct_trips::Trip;

/// One point of one trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripPointRow {
    pub person_id: u32,
    pub direction: &'static str,
    /// Position of the point along its trip, from 0.
    pub seq:       u32,
    pub lon:       f64,
    pub lat:       f64,
    pub timestamp: i64,
}

impl TripPointRow {
    pub const HEADER: [&'static str; 6] = ["person_id", "type", "seq", "lon", "lat", "timestamp"];

    /// Every point of `trip`, in path order.
    pub fn from_trip(trip: &Trip) -> impl Iterator<Item = TripPointRow> + '_ {
        trip.path
            .iter()
            .zip(&trip.timestamps)
            .enumerate()
            .map(move |(seq, (&[lon, lat], &timestamp))| TripPointRow {
                person_id: trip.person_id.0,
                direction: trip.direction.as_str(),
                seq: seq as u32,
                lon,
                lat,
                timestamp,
            })
    }
}
