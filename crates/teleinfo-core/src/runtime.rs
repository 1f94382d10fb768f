//! Reading loop.
//!
//! [`run`] drives a [`TeleinfoReader`] until the stream ends or a stop flag
//! is raised, and applies the error policy:
//!
//! | outcome                  | action                        |
//! |--------------------------|-------------------------------|
//! | frame                    | hand to the sink              |
//! | rejected frame           | log, count, keep reading      |
//! | source timeout           | count, keep reading           |
//! | end of stream            | stop                          |
//! | I/O error                | stop and return the error     |
//!
//! The stop flag is checked between reads only. A blocked read returns on
//! the source's own timeout, which is what bounds the shutdown latency.

use std::sync::atomic::{AtomicBool, Ordering};

use teleinfo_proto::FrameRecord;
use tracing::{debug, info, warn};

use crate::{error::ReadError, reader::TeleinfoReader, source::ByteSource};

/// Counters collected by [`run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames handed to the sink
    pub frames: u64,
    /// Frames rejected (malformed line, checksum, oversized)
    pub dropped: u64,
    /// Reads that timed out without data
    pub timeouts: u64,
}

/// Why [`run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The source was exhausted
    StreamEnd,
    /// The stop flag was raised
    Stopped,
}

/// Result of a completed [`run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Why the loop ended
    pub reason: StopReason,
    /// What happened along the way
    pub stats: RunStats,
}

/// Read frames until the stream ends or `stop` is set.
///
/// # Errors
///
/// Returns the first non-recoverable [`ReadError`]. Rejected frames and
/// timeouts never end the loop.
pub fn run<S, F>(
    reader: &mut TeleinfoReader<S>,
    stop: &AtomicBool,
    mut sink: F,
) -> Result<RunSummary, ReadError>
where
    S: ByteSource,
    F: FnMut(FrameRecord),
{
    let mut stats = RunStats::default();

    loop {
        if stop.load(Ordering::Acquire) {
            info!(frames = stats.frames, dropped = stats.dropped, "stop requested");
            return Ok(RunSummary { reason: StopReason::Stopped, stats });
        }

        match reader.read_frame() {
            Ok(Some(record)) => {
                stats.frames += 1;
                sink(record);
            },
            Ok(None) => {
                info!(frames = stats.frames, dropped = stats.dropped, "stream ended");
                return Ok(RunSummary { reason: StopReason::StreamEnd, stats });
            },
            Err(ReadError::TimedOut) => {
                stats.timeouts += 1;
                debug!("no data before timeout");
            },
            Err(err) if err.is_recoverable() => {
                stats.dropped += 1;
                warn!(error = %err, "dropping frame");
            },
            Err(err) => return Err(err),
        }
    }
}
