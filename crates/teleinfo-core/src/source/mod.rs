//! Byte source abstraction.
//!
//! A [`ByteSource`] is the only thing the reader knows about the outside
//! world. Production uses a serial line ([`SerialSource`]) or a recorded
//! capture ([`FileSource`]); tests use scripted sources from
//! `teleinfo-harness`.
//!
//! # Handle lifetime
//!
//! Sources open their handle on construction and release it exactly once,
//! either on the first [`ByteSource::close`] or when dropped. Reads after
//! close report [`ReadOutcome::Closed`].

mod file;
mod serial;

use std::io::{self, Read};

pub use file::FileSource;
pub use serial::{SerialConfig, SerialSource};

/// Result of a single read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// This many bytes (at least one) were written to the buffer
    Data(usize),

    /// No byte arrived before the source's timeout
    TimedOut,

    /// The channel is exhausted: end of file, peer hangup, or closed
    Closed,
}

/// A blocking, byte-oriented channel.
pub trait ByteSource {
    /// Read up to `buf.len()` bytes.
    ///
    /// Blocks until at least one byte is available, the source's timeout
    /// elapses, or the channel ends. `buf` must not be empty.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error for anything other than a timeout
    /// or end of stream.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<ReadOutcome>;

    /// Release the underlying handle.
    ///
    /// Idempotent: only the first call releases anything.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing or closing the handle fails.
    fn close(&mut self) -> io::Result<()>;
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<ReadOutcome> {
        (**self).read(buf)
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Read once from `reader`, retrying reads interrupted by a signal.
pub(crate) fn read_outcome<R: Read + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
) -> io::Result<ReadOutcome> {
    loop {
        match reader.read(buf) {
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {},
            result => return classify(result),
        }
    }
}

/// Map a raw `io::Read` result onto a [`ReadOutcome`].
///
/// `Ok(0)` is end of stream and `TimedOut`/`WouldBlock` are timeouts.
fn classify(result: io::Result<usize>) -> io::Result<ReadOutcome> {
    match result {
        Ok(0) => Ok(ReadOutcome::Closed),
        Ok(n) => Ok(ReadOutcome::Data(n)),
        Err(err) => match err.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Ok(ReadOutcome::TimedOut),
            io::ErrorKind::UnexpectedEof | io::ErrorKind::BrokenPipe => Ok(ReadOutcome::Closed),
            _ => Err(err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_read_results() {
        assert_eq!(classify(Ok(5)).unwrap(), ReadOutcome::Data(5));
        assert_eq!(classify(Ok(0)).unwrap(), ReadOutcome::Closed);
        assert_eq!(
            classify(Err(io::ErrorKind::TimedOut.into())).unwrap(),
            ReadOutcome::TimedOut
        );
        assert_eq!(
            classify(Err(io::ErrorKind::BrokenPipe.into())).unwrap(),
            ReadOutcome::Closed
        );
    }

    /// Reader replaying canned results, then end of stream.
    struct Replay(Vec<io::Result<usize>>);

    impl Read for Replay {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() {
                return Ok(0);
            }
            let result = self.0.remove(0);
            if let Ok(n) = result {
                buf[..n].fill(b'x');
            }
            result
        }
    }

    #[test]
    fn interrupted_read_is_retried() {
        let mut reader = Replay(vec![
            Err(io::ErrorKind::Interrupted.into()),
            Err(io::ErrorKind::Interrupted.into()),
            Ok(3),
        ]);
        let mut buf = [0u8; 8];

        assert_eq!(read_outcome(&mut reader, &mut buf).unwrap(), ReadOutcome::Data(3));
        assert_eq!(&buf[..3], b"xxx");
        assert_eq!(read_outcome(&mut reader, &mut buf).unwrap(), ReadOutcome::Closed);
    }

    #[test]
    fn timeout_is_not_retried() {
        let mut reader = Replay(vec![Err(io::ErrorKind::TimedOut.into()), Ok(1)]);
        let mut buf = [0u8; 8];

        assert_eq!(read_outcome(&mut reader, &mut buf).unwrap(), ReadOutcome::TimedOut);
        assert_eq!(read_outcome(&mut reader, &mut buf).unwrap(), ReadOutcome::Data(1));
    }

    #[test]
    fn classify_keeps_real_errors() {
        let err = classify(Err(io::ErrorKind::PermissionDenied.into())).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
