//! Scripted byte source.

use std::{
    collections::VecDeque,
    io,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use bytes::Bytes;
use teleinfo_core::{ByteSource, ReadOutcome};

/// One scripted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Bytes delivered to the reader, split across reads if the reader's
    /// buffer is smaller
    Data(Bytes),
    /// A read that times out without data
    Timeout,
    /// A read that fails with this error kind
    Fail(io::ErrorKind),
}

/// Counts how many times a [`ScriptedSource`] released its handle.
///
/// Stays valid after the source itself has been dropped.
#[derive(Debug, Clone, Default)]
pub struct ReleaseProbe(Arc<AtomicUsize>);

impl ReleaseProbe {
    /// Number of releases so far
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// A [`ByteSource`] that plays back a fixed script, then reports end of
/// stream.
///
/// Dropping the source counts as a release if it was never closed, just
/// like a real handle.
#[derive(Debug)]
pub struct ScriptedSource {
    steps: VecDeque<Step>,
    open: bool,
    releases: ReleaseProbe,
    reads: usize,
}

impl ScriptedSource {
    /// Empty script: the first read reports end of stream.
    pub fn new() -> Self {
        Self { steps: VecDeque::new(), open: true, releases: ReleaseProbe::default(), reads: 0 }
    }

    /// Script delivering `bytes` in one step.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self::new().data(bytes)
    }

    /// Script delivering `bytes` in chunks of at most `size` bytes, one
    /// chunk per read.
    pub fn chunked(bytes: &[u8], size: usize) -> Self {
        bytes
            .chunks(size.max(1))
            .fold(Self::new(), |source, chunk| source.data(Bytes::copy_from_slice(chunk)))
    }

    /// Append a data step.
    #[must_use]
    pub fn data(mut self, bytes: impl Into<Bytes>) -> Self {
        self.steps.push_back(Step::Data(bytes.into()));
        self
    }

    /// Append a timeout step.
    #[must_use]
    pub fn timeout(mut self) -> Self {
        self.steps.push_back(Step::Timeout);
        self
    }

    /// Append a failing read.
    #[must_use]
    pub fn fail(mut self, kind: io::ErrorKind) -> Self {
        self.steps.push_back(Step::Fail(kind));
        self
    }

    /// Probe observing handle releases.
    pub fn release_probe(&self) -> ReleaseProbe {
        self.releases.clone()
    }

    /// Number of `read` calls served so far.
    pub fn reads(&self) -> usize {
        self.reads
    }

    fn release(&mut self) {
        if self.open {
            self.open = false;
            self.releases.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSource for ScriptedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<ReadOutcome> {
        self.reads += 1;
        if !self.open {
            return Ok(ReadOutcome::Closed);
        }

        match self.steps.pop_front() {
            Some(Step::Data(mut bytes)) => {
                let n = buf.len().min(bytes.len());
                buf[..n].copy_from_slice(&bytes.split_to(n));
                if !bytes.is_empty() {
                    self.steps.push_front(Step::Data(bytes));
                }
                Ok(ReadOutcome::Data(n))
            },
            Some(Step::Timeout) => Ok(ReadOutcome::TimedOut),
            Some(Step::Fail(kind)) => Err(io::Error::new(kind, "scripted failure")),
            None => Ok(ReadOutcome::Closed),
        }
    }

    fn close(&mut self) -> io::Result<()> {
        self.release();
        Ok(())
    }
}

impl Drop for ScriptedSource {
    fn drop(&mut self) {
        self.release();
    }
}
