//! CSV output backend: one row per trip point.
//!
//! ```csv
//! person_id,type,seq,lon,lat,timestamp
//! 0,to_work,0,-70.62,-33.46,1704094200
//! 0,to_work,1,-70.61,-33.46,1704094290
//! ```
//!
//! Each batch is encoded in memory and handed to the sink in one
//! `write_all`, so a failing sink can cut off the tail of the batch being
//! written but never drops rows from the middle of the file.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use ct_trips::TripBatch;

use crate::row::TripPointRow;
use crate::writer::TripWriter;
use crate::{OutputError, OutputResult};

pub struct CsvWriter<W: Write> {
    out:      W,
    finished: bool,
}

impl CsvWriter<File> {
    /// Create (or truncate) the CSV file at `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> CsvWriter<W> {
    /// Wrap `out` and write the header row.
    pub fn new(mut out: W) -> OutputResult<Self> {
        let header = encode(|w| w.write_record(TripPointRow::HEADER))?;
        out.write_all(&header)?;
        Ok(Self { out, finished: false })
    }

    /// Flush and return the underlying sink.
    pub fn into_inner(mut self) -> OutputResult<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Run `fill` against an in-memory CSV writer and return the bytes.
fn encode<F>(fill: F) -> OutputResult<Vec<u8>>
where
    F: FnOnce(&mut csv::Writer<Vec<u8>>) -> csv::Result<()>,
{
    let mut w = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    fill(&mut w)?;
    w.into_inner()
        .map_err(|e| OutputError::Io(std::io::Error::new(e.error().kind(), e.to_string())))
}

impl<W: Write> TripWriter for CsvWriter<W> {
    fn write_batch(&mut self, batch: &TripBatch) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        let rows = encode(|w| {
            for trip in &batch.trips {
                for row in TripPointRow::from_trip(trip) {
                    w.write_record(&[
                        row.person_id.to_string(),
                        row.direction.to_owned(),
                        row.seq.to_string(),
                        row.lon.to_string(),
                        row.lat.to_string(),
                        row.timestamp.to_string(),
                    ])?;
                }
            }
            Ok(())
        })?;
        self.out.write_all(&rows)?;
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
