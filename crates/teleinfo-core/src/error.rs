//! Errors surfaced while reading frames from a source.

use std::io;

use teleinfo_proto::ProtocolError;
use thiserror::Error;

/// Errors returned by [`crate::TeleinfoReader::read_frame`].
///
/// End of stream is not an error: it is reported as `Ok(None)`.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The captured frame was rejected (bad line, checksum, size)
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The source produced no byte before its timeout
    #[error("no data received before the source timeout")]
    TimedOut,

    /// The underlying channel failed
    #[error("source i/o error: {0}")]
    Io(#[from] io::Error),
}

impl ReadError {
    /// Returns true if reading may continue after this error.
    ///
    /// Rejected frames and timeouts only cost the current frame. I/O errors
    /// mean the channel is gone.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Protocol(_) | Self::TimedOut)
    }
}
