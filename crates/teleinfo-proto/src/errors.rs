//! Error types for frame parsing and field access.

use thiserror::Error;

/// Convenience alias for parsing results.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while turning a raw payload into a record.
///
/// Every variant invalidates the whole frame. Readers drop the frame and
/// keep going with the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Line does not follow `<LABEL> <VALUE> <CHECKSUM>`
    #[error("malformed line {line:?}: {reason}")]
    MalformedLine {
        /// Offending line, lossily decoded
        line: String,
        /// What was wrong with it
        reason: &'static str,
    },

    /// Checksum byte does not match the line content
    #[error("checksum mismatch for line {line:?}: expected {expected:#04x}, found {actual:#04x}")]
    ChecksumMismatch {
        /// Offending line, lossily decoded
        line: String,
        /// Checksum computed from the line content
        expected: u8,
        /// Checksum byte carried by the line
        actual: u8,
    },

    /// Frame grew past the extractor's payload limit before its end marker
    #[error("frame payload exceeds {max} bytes")]
    PayloadTooLarge {
        /// Configured limit in bytes
        max: usize,
    },
}

/// Errors raised when coercing a stored value to its declared type.
///
/// These never happen during parsing. They surface only when a caller reads
/// a field through [`crate::FrameRecord::get`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Label is not present in the record
    #[error("field {label} is not present")]
    Missing {
        /// Requested label
        label: String,
    },

    /// Raw bytes are not valid UTF-8
    #[error("field {label} is not valid text")]
    NotText {
        /// Field label
        label: String,
    },

    /// Integer field does not hold a base-10 integer
    #[error("field {label} is not an integer: {value:?}")]
    InvalidInteger {
        /// Field label
        label: String,
        /// Raw text that failed to parse
        value: String,
    },
}

impl ProtocolError {
    pub(crate) fn malformed(line: &[u8], reason: &'static str) -> Self {
        Self::MalformedLine { line: String::from_utf8_lossy(line).into_owned(), reason }
    }
}
