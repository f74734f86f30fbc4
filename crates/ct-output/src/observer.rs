//! `StreamOutputObserver<W>`: bridges `TripObserver` to a `TripWriter`.

use log::debug;

use ct_trips::{StreamSummary, TripBatch, TripObserver};

use crate::writer::TripWriter;
use crate::{OutputError, OutputResult};

/// A [`TripObserver`] that writes every batch to any [`TripWriter`].
///
/// Errors from the writer are stored internally because `TripObserver`
/// methods have no return value.  After `stream.run()` returns, check for
/// errors with [`take_error`][Self::take_error].  Once a write has failed,
/// later batches are skipped so the output never has a hole in the middle;
/// at worst the failed batch itself is truncated at the end of the output.
pub struct StreamOutputObserver<W: TripWriter> {
    writer:          W,
    batches_written: usize,
    trips_written:   usize,
    last_error:      Option<OutputError>,
}

impl<W: TripWriter> StreamOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, batches_written: 0, trips_written: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `stream.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn batches_written(&self) -> usize {
        self.batches_written
    }

    pub fn trips_written(&self) -> usize {
        self.trips_written
    }

    /// Unwrap the inner writer (e.g. to inspect the output after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TripWriter> TripObserver for StreamOutputObserver<W> {
    fn on_batch(&mut self, batch: &TripBatch) {
        if self.last_error.is_some() {
            return;
        }
        let result = self.writer.write_batch(batch);
        if result.is_ok() {
            self.batches_written += 1;
            self.trips_written += batch.trips.len();
        }
        self.store_err(result);
    }

    fn on_stream_end(&mut self, summary: &StreamSummary) {
        debug!(
            "output: {} batches / {} trips written (stream: {:?})",
            self.batches_written, self.trips_written, summary
        );
        let result = self.writer.finish();
        self.store_err(result);
    }
}
