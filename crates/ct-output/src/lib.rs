//! `ct-output`: sinks for streamed commute trips.
//!
//! | Backend            | Format                                                 |
//! |--------------------|--------------------------------------------------------|
//! | [`JsonLinesWriter`] | one JSON array of trip records per batch, `\n`-framed |
//! | [`CsvWriter`]       | one row per trip point (`person_id,type,seq,lon,lat,timestamp`) |
//!
//! All backends implement [`TripWriter`] and are driven by
//! [`StreamOutputObserver`], which implements `ct_trips::TripObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ct_output::{JsonLinesWriter, StreamOutputObserver};
//!
//! let mut obs = StreamOutputObserver::new(JsonLinesWriter::new(std::io::stdout()));
//! let summary = stream.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod json;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use json::JsonLinesWriter;
pub use observer::StreamOutputObserver;
pub use row::TripPointRow;
pub use writer::TripWriter;
