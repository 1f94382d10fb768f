//! Frame reader over a byte source.

use std::{io, path::Path};

use chrono::Utc;
use teleinfo_proto::{FrameRecord, parse_frame};
use tracing::{debug, trace, warn};

use crate::{
    error::ReadError,
    extractor::{ExtractorState, FrameExtractor},
    source::{ByteSource, FileSource, ReadOutcome, SerialConfig, SerialSource},
};

/// Reader configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Largest chunk requested from the source in one read
    pub chunk_size: usize,
    /// Payload limit handed to the extractor
    pub max_payload: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { chunk_size: 64, max_payload: FrameExtractor::DEFAULT_MAX_PAYLOAD }
    }
}

/// Reads validated frames from a [`ByteSource`].
///
/// The reader owns its source for its whole lifetime and closes it when
/// dropped. Bytes read past the end of a frame are kept for the next call,
/// so chunked reads never lose data.
///
/// Not meant to be shared: every call takes `&mut self`.
#[derive(Debug)]
pub struct TeleinfoReader<S: ByteSource> {
    source: S,
    extractor: FrameExtractor,
    chunk: Vec<u8>,
    cursor: usize,
    filled: usize,
}

impl TeleinfoReader<SerialSource> {
    /// Open a reader on a serial device.
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be opened.
    pub fn open_serial(path: &str, serial: &SerialConfig, config: ReaderConfig) -> io::Result<Self> {
        Ok(Self::with_config(SerialSource::open(path, serial)?, config))
    }
}

impl TeleinfoReader<FileSource> {
    /// Open a reader replaying a capture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open_file(path: impl AsRef<Path>, config: ReaderConfig) -> io::Result<Self> {
        Ok(Self::with_config(FileSource::open(path)?, config))
    }
}

impl<S: ByteSource> TeleinfoReader<S> {
    /// Create a reader with the default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, ReaderConfig::default())
    }

    /// Create a reader with an explicit configuration.
    pub fn with_config(source: S, config: ReaderConfig) -> Self {
        Self {
            source,
            extractor: FrameExtractor::with_max_payload(config.max_payload),
            chunk: vec![0; config.chunk_size.max(1)],
            cursor: 0,
            filled: 0,
        }
    }

    /// Read the next complete frame.
    ///
    /// Returns `Ok(None)` once the source is exhausted. A frame cut short by
    /// the end of the stream is discarded, never returned.
    ///
    /// # Errors
    ///
    /// - [`ReadError::Protocol`] if the frame was captured but rejected. The
    ///   frame is gone; the next call continues with the following one.
    /// - [`ReadError::TimedOut`] if the source timed out. A partial capture
    ///   is kept and resumed on the next call.
    /// - [`ReadError::Io`] if the source failed.
    pub fn read_frame(&mut self) -> Result<Option<FrameRecord>, ReadError> {
        loop {
            while self.cursor < self.filled {
                let byte = self.chunk[self.cursor];
                self.cursor += 1;

                if let Some(payload) = self.extractor.push(byte)? {
                    let captured_at = Utc::now();
                    trace!(len = payload.len(), "captured frame payload");

                    let record = parse_frame(&payload, captured_at)?;
                    debug!(fields = record.len(), "read frame");
                    return Ok(Some(record));
                }
            }

            match self.source.read(&mut self.chunk)? {
                ReadOutcome::Data(n) => {
                    self.cursor = 0;
                    self.filled = n;
                },
                ReadOutcome::TimedOut => return Err(ReadError::TimedOut),
                ReadOutcome::Closed => {
                    if self.extractor.state() == ExtractorState::Capturing {
                        let discarded = self.extractor.reset();
                        warn!(discarded, "stream ended inside a frame");
                    }
                    return Ok(None);
                },
            }
        }
    }

    /// Current extractor state.
    pub fn state(&self) -> ExtractorState {
        self.extractor.state()
    }

    /// Close the source now instead of on drop.
    ///
    /// # Errors
    ///
    /// Returns the source's close error.
    pub fn close(mut self) -> io::Result<()> {
        self.source.close()
    }
}

impl<S: ByteSource> Drop for TeleinfoReader<S> {
    fn drop(&mut self) {
        if let Err(err) = self.source.close() {
            warn!(error = %err, "failed to close source");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source over an in-memory slice, one chunk per read.
    struct SliceSource<'a> {
        data: &'a [u8],
    }

    impl ByteSource for SliceSource<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<ReadOutcome> {
            if self.data.is_empty() {
                return Ok(ReadOutcome::Closed);
            }
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(ReadOutcome::Data(n))
        }

        fn close(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn reads_frame_then_end_of_stream() {
        let source = SliceSource { data: b"\x02\nADCO 012345678901 E\r\x03" };
        let mut reader = TeleinfoReader::new(source);

        let record = reader.read_frame().unwrap().unwrap();
        assert_eq!(record.raw("ADCO"), Some(&b"012345678901"[..]));
        assert!(reader.read_frame().unwrap().is_none());
    }

    #[test]
    fn leftover_bytes_carry_over() {
        let data = b"\x02\nIINST 002 Y\r\x03\x02\nIINST 003 Z\r\x03";
        let config = ReaderConfig { chunk_size: data.len(), ..ReaderConfig::default() };
        let mut reader = TeleinfoReader::with_config(SliceSource { data }, config);

        assert_eq!(reader.read_frame().unwrap().unwrap().raw("IINST"), Some(&b"002"[..]));
        assert_eq!(reader.read_frame().unwrap().unwrap().raw("IINST"), Some(&b"003"[..]));
        assert!(reader.read_frame().unwrap().is_none());
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        let config = ReaderConfig { chunk_size: 0, ..ReaderConfig::default() };
        let mut reader = TeleinfoReader::with_config(SliceSource { data: b"\x02\x03" }, config);

        assert!(reader.read_frame().unwrap().unwrap().is_empty());
    }

    #[test]
    fn truncated_frame_is_discarded() {
        let mut reader = TeleinfoReader::new(SliceSource { data: b"\x02\nIINST 002 Y\r" });

        assert!(reader.read_frame().unwrap().is_none());
        assert_eq!(reader.state(), ExtractorState::Idle);
    }
}
