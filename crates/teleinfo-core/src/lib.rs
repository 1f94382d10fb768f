//! Teleinfo stream reading.
//!
//! Turns a raw byte channel into a sequence of validated
//! [`FrameRecord`](teleinfo_proto::FrameRecord)s. Parsing itself lives in
//! `teleinfo-proto`; this crate owns the parts that deal with a live
//! stream.
//!
//! # Architecture
//!
//! ```text
//! ByteSource ──chunks──> FrameExtractor ──payload──> parse_frame ──> FrameRecord
//!  (serial, file)          (Idle/Capturing)           (teleinfo-proto)
//! ```
//!
//! [`TeleinfoReader`] owns one source and one extractor and hands out one
//! record per [`TeleinfoReader::read_frame`] call. [`run`] wraps it in the
//! reading loop: corrupted frames are logged and skipped, timeouts give the
//! loop a chance to observe its stop flag, and the loop ends with the
//! stream.
//!
//! Everything is synchronous and single-threaded. A read blocks for at most
//! the source's timeout.
//!
//! # Components
//!
//! - [`source`]: byte source abstraction plus file and serial sources
//! - [`extractor`]: start/end marker state machine
//! - [`reader`]: the reader tying source, extractor and parser together
//! - [`runtime`]: the reading loop
//! - [`point`]: output shape handed to time-series writers
//! - [`error`]: read errors

pub mod error;
pub mod extractor;
pub mod point;
pub mod reader;
pub mod runtime;
pub mod source;

pub use error::ReadError;
pub use extractor::{ExtractorState, FrameExtractor};
pub use point::Point;
pub use reader::{ReaderConfig, TeleinfoReader};
pub use runtime::{RunStats, RunSummary, StopReason, run};
pub use source::{ByteSource, FileSource, ReadOutcome, SerialConfig, SerialSource};
