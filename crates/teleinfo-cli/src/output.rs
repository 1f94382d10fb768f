//! JSON-lines point writer.

use std::io::{self, Write};

use teleinfo_core::Point;
use teleinfo_proto::FrameRecord;
use tracing::warn;

/// Writes one JSON point per line.
#[derive(Debug)]
pub struct PointWriter<W: Write> {
    out: W,
    measurement: String,
}

impl<W: Write> PointWriter<W> {
    /// Writer tagging every point with `measurement`.
    pub fn new(out: W, measurement: impl Into<String>) -> Self {
        Self { out, measurement: measurement.into() }
    }

    /// Write `record` as one line.
    ///
    /// Returns `Ok(false)` if a field did not coerce; the record is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write(&mut self, record: &FrameRecord) -> io::Result<bool> {
        let point = match Point::from_record(self.measurement.as_str(), record) {
            Ok(point) => point,
            Err(err) => {
                warn!(error = %err, "skipping frame with invalid field");
                return Ok(false);
            },
        };

        serde_json::to_writer(&mut self.out, &point)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(true)
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Frame sink for the reading loop: writes points up to an optional limit
/// and remembers the first output error.
///
/// Once [`PointSink::is_done`] turns true, further records are ignored.
#[derive(Debug)]
pub struct PointSink<W: Write> {
    writer: PointWriter<W>,
    max_points: Option<u64>,
    written: u64,
    error: Option<io::Error>,
}

impl<W: Write> PointSink<W> {
    /// Sink writing at most `max_points` points, or without limit.
    pub fn new(writer: PointWriter<W>, max_points: Option<u64>) -> Self {
        Self { writer, max_points, written: 0, error: None }
    }

    /// True when the limit is reached or the output failed. A limit of zero
    /// is done before the first record.
    pub fn is_done(&self) -> bool {
        self.error.is_some() || self.max_points.is_some_and(|max| self.written >= max)
    }

    /// Write `record` unless the sink is done.
    pub fn accept(&mut self, record: &FrameRecord) {
        if self.is_done() {
            return;
        }
        match self.writer.write(record) {
            Ok(true) => self.written += 1,
            Ok(false) => {},
            Err(err) => self.error = Some(err),
        }
    }

    /// Number of points written.
    ///
    /// # Errors
    ///
    /// Returns the output error that stopped the sink, if any.
    pub fn finish(self) -> io::Result<u64> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.written),
        }
    }
}
