//! Test harness for teleinfo readers.
//!
//! Deterministic stand-ins for a meter on a serial line:
//!
//! - [`ScriptedSource`]: a [`ByteSource`](teleinfo_core::ByteSource) that
//!   replays a script of chunks, timeouts and failures
//! - [`wire`]: builders for checksummed lines and framed payloads

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod scripted;
pub mod wire;

pub use scripted::{ReleaseProbe, ScriptedSource, Step};
