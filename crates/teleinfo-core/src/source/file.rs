//! File-backed source for replaying recorded captures.

use std::{fs::File, io, path::Path};

use tracing::debug;

use super::{ByteSource, ReadOutcome, read_outcome};

/// Replays a file byte for byte. Never times out.
#[derive(Debug)]
pub struct FileSource {
    file: Option<File>,
}

impl FileSource {
    /// Open `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "opened capture file");
        Ok(Self { file: Some(file) })
    }

    /// True until the handle has been released.
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }
}

impl ByteSource for FileSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<ReadOutcome> {
        match self.file.as_mut() {
            Some(file) => read_outcome(file, buf),
            None => Ok(ReadOutcome::Closed),
        }
    }

    fn close(&mut self) -> io::Result<()> {
        if self.file.take().is_some() {
            debug!("closed capture file");
        }
        Ok(())
    }
}
