//! Random byte streams through the extractor and reader.
//!
//! The first byte picks the read chunk size so chunk boundaries land
//! everywhere.

#![no_main]

use std::io;

use libfuzzer_sys::fuzz_target;
use teleinfo_core::{ByteSource, ReadError, ReadOutcome, ReaderConfig, TeleinfoReader};

struct FuzzSource<'a> {
    data: &'a [u8],
}

impl ByteSource for FuzzSource<'_> {
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

fuzz_target!(|data: &[u8]| {
    let Some((&chunk, stream)) = data.split_first() else {
        return;
    };

    let config = ReaderConfig { chunk_size: usize::from(chunk).max(1), max_payload: 512 };
    let mut reader = TeleinfoReader::with_config(FuzzSource { data: stream }, config);

    loop {
        match reader.read_frame() {
            Ok(Some(_)) => {},
            Ok(None) => break,
            Err(err) => assert!(matches!(err, ReadError::Protocol(_))),
        }
    }
});
