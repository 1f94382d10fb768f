//! Wire format for the teleinfo power meter protocol.
//!
//! A meter emits an endless stream of frames. Each frame sits between a
//! start byte (`0x02`) and an end byte (`0x03`) and carries CRLF-separated
//! lines of the form `<LABEL> <VALUE> <CHECKSUM>`:
//!
//! ```text
//! 0x02 ADCO 012345678901 E \r\n HCHC 001234567 " 0x03
//! ```
//!
//! This crate handles everything that happens once a payload has been cut
//! out of the stream: line splitting, checksum validation and typed access
//! to the validated values. Locating payloads in a byte stream lives in
//! `teleinfo-core`.
//!
//! # Validation
//!
//! A frame is validated as a whole. One malformed or corrupted line drops
//! the entire frame, so a [`FrameRecord`] never holds a field that did not
//! pass its checksum on the wire.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod checksum;
pub mod errors;
pub mod fields;
pub mod line;
pub mod record;

pub use errors::{FieldError, ProtocolError, Result};
pub use fields::{FieldType, FieldValue};
pub use line::{Line, parse_frame};
pub use record::FrameRecord;

/// Start-of-frame control byte (STX).
pub const FRAME_START: u8 = 0x02;

/// End-of-frame control byte (ETX).
pub const FRAME_END: u8 = 0x03;
