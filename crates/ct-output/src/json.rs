//! JSON-lines output backend.
//!
//! Each batch becomes one line holding a JSON array of trip records:
//!
//! ```text
//! [{"start_time":1704094200,"path":[[-70.62,-33.46],...],"timestamps":[...],"type":"to_work"},...]
//! [...]
//! ```
//!
//! A batch whose trips were all route gaps is written as `[]`, so line `i`
//! always corresponds to batch `i`.  Each line is encoded in memory first
//! and written with a single `write_all`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use ct_trips::TripBatch;

use crate::writer::TripWriter;
use crate::{OutputError, OutputResult};

pub struct JsonLinesWriter<W: Write> {
    out:      W,
    finished: bool,
}

impl JsonLinesWriter<File> {
    pub fn create(path: &Path) -> OutputResult<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, finished: false }
    }

    /// Flush and return the underlying sink.
    pub fn into_inner(mut self) -> OutputResult<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> TripWriter for JsonLinesWriter<W> {
    fn write_batch(&mut self, batch: &TripBatch) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        let mut line = serde_json::to_vec(&batch.trips)?;
        line.push(b'\n');
        self.out.write_all(&line)?;
        // Consumers tail the output; each batch must be visible on its own.
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
