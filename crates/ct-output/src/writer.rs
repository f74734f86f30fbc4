//! The `TripWriter` trait implemented by every sink.

use ct_trips::TripBatch;

use crate::OutputResult;

/// A sink for trip batches.
///
/// Each call to [`write_batch`](Self::write_batch) emits one complete,
/// independently parseable unit, so a consumer reading the output while the
/// stream is still running never sees half a batch.
pub trait TripWriter {
    /// Append one batch.
    fn write_batch(&mut self, batch: &TripBatch) -> OutputResult<()>;

    /// Flush and close the underlying sink.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
