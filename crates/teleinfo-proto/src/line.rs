//! Line splitting and validation.
//!
//! A payload is trimmed, split on CRLF, and every line is split on its
//! first two spaces:
//!
//! ```text
//! HCHC 001234567 "
//! ^^^^ ^^^^^^^^^ ^
//! label  value   checksum
//! ```
//!
//! The value cannot contain a space. A line whose checksum token is longer
//! than one byte is rejected rather than silently truncated.

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::{
    checksum,
    errors::{ProtocolError, Result},
    record::FrameRecord,
};

/// One validated `<LABEL> <VALUE> <CHECKSUM>` line, borrowed from its
/// payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Field label, e.g. `HCHC`
    pub label: &'a str,
    /// Raw value bytes as sent by the meter
    pub value: &'a [u8],
    /// Checksum byte carried by the line
    pub checksum: u8,
}

impl<'a> Line<'a> {
    /// Split and validate a single line.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::MalformedLine`] if the line does not split into
    ///   label, value and a one-byte checksum, or the label is not text
    /// - [`ProtocolError::ChecksumMismatch`] if the checksum byte disagrees
    ///   with the line content
    pub fn parse(raw: &'a [u8]) -> Result<Self> {
        let mut tokens = raw.splitn(3, |&b| b == b' ');
        let (Some(label), Some(value), Some(trailer)) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(ProtocolError::malformed(raw, "expected label, value and checksum"));
        };

        if label.is_empty() {
            return Err(ProtocolError::malformed(raw, "empty label"));
        }

        let &[actual] = trailer else {
            return Err(ProtocolError::malformed(raw, "checksum must be a single byte"));
        };

        let label = std::str::from_utf8(label)
            .map_err(|_| ProtocolError::malformed(raw, "label is not valid text"))?;

        // Everything except the trailing "<SP><CHECKSUM>"
        let expected = checksum::compute(&raw[..raw.len() - 2]);
        if expected != actual {
            return Err(ProtocolError::ChecksumMismatch {
                line: String::from_utf8_lossy(raw).into_owned(),
                expected,
                actual,
            });
        }

        Ok(Self { label, value, checksum: actual })
    }
}

/// Payload whitespace: ASCII whitespace plus vertical tab.
fn is_payload_space(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0x0B
}

/// Strip leading and trailing payload whitespace.
fn trim_payload(payload: &[u8]) -> &[u8] {
    let start = payload.iter().position(|&b| !is_payload_space(b)).unwrap_or(payload.len());
    let end = payload.iter().rposition(|&b| !is_payload_space(b)).map_or(start, |last| last + 1);
    &payload[start..end]
}

/// Split a trimmed payload into its CRLF-separated lines.
///
/// Trimming removes spaces, tabs, CR, LF, form feeds and vertical tabs. An
/// empty (or all-whitespace) payload has no lines.
pub fn split_lines(payload: &[u8]) -> impl Iterator<Item = &[u8]> {
    let trimmed = trim_payload(payload);
    let mut rest = (!trimmed.is_empty()).then_some(trimmed);

    std::iter::from_fn(move || {
        let current = rest?;
        match current.windows(2).position(|pair| pair == b"\r\n") {
            Some(at) => {
                rest = Some(&current[at + 2..]);
                Some(&current[..at])
            },
            None => {
                rest = None;
                Some(current)
            },
        }
    })
}

/// Parse a complete frame payload into a record.
///
/// `captured_at` is the instant the payload's end marker was seen.
///
/// # Errors
///
/// The first malformed or corrupted line aborts the frame. No partial
/// record is ever returned.
pub fn parse_frame(payload: &[u8], captured_at: DateTime<Utc>) -> Result<FrameRecord> {
    let mut record = FrameRecord::new(captured_at);

    for raw in split_lines(payload) {
        let line = Line::parse(raw)?;
        record.insert(line.label, Bytes::copy_from_slice(line.value));
    }

    Ok(record)
}
