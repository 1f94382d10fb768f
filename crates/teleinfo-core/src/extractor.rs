//! Frame boundary state machine.
//!
//! ```text
//!            0x02
//!  ┌──────┐ ─────────> ┌───────────┐ ──┐ any other byte
//!  │ Idle │            │ Capturing │   │ (0x02 included)
//!  └──────┘ <───────── └───────────┘ <─┘ appended
//!   │  ^      0x03:
//!   └──┘      emit payload
//!  other bytes
//!  dropped
//! ```
//!
//! A start marker seen while capturing is payload data; it does not restart
//! the frame.
//!
//! The extractor is fed one byte at a time and never touches I/O.

use bytes::{BufMut, Bytes, BytesMut};
use teleinfo_proto::{FRAME_END, FRAME_START, ProtocolError};

/// Extractor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorState {
    /// Scanning for a start marker
    Idle,
    /// Start marker seen, accumulating payload
    Capturing,
}

/// Cuts frame payloads out of a byte stream.
#[derive(Debug, Clone)]
pub struct FrameExtractor {
    state: ExtractorState,
    buffer: BytesMut,
    max_payload: usize,
}

impl FrameExtractor {
    /// Default payload limit. Real frames are a few hundred bytes.
    pub const DEFAULT_MAX_PAYLOAD: usize = 64 * 1024;

    /// Create an idle extractor with the default payload limit.
    pub fn new() -> Self {
        Self::with_max_payload(Self::DEFAULT_MAX_PAYLOAD)
    }

    /// Create an idle extractor that rejects payloads above `max_payload`
    /// bytes.
    pub fn with_max_payload(max_payload: usize) -> Self {
        Self { state: ExtractorState::Idle, buffer: BytesMut::new(), max_payload }
    }

    /// Current state
    pub fn state(&self) -> ExtractorState {
        self.state
    }

    /// Bytes captured so far for the current frame.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Feed one byte.
    ///
    /// Returns the completed payload when `byte` is the end marker of a
    /// frame being captured.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::PayloadTooLarge`] when the capture would grow
    /// past the limit. The partial payload is dropped and the extractor goes
    /// back to [`ExtractorState::Idle`].
    pub fn push(&mut self, byte: u8) -> Result<Option<Bytes>, ProtocolError> {
        match self.state {
            ExtractorState::Idle => {
                if byte == FRAME_START {
                    self.state = ExtractorState::Capturing;
                }
                Ok(None)
            },
            ExtractorState::Capturing if byte == FRAME_END => {
                self.state = ExtractorState::Idle;
                Ok(Some(self.buffer.split().freeze()))
            },
            ExtractorState::Capturing => {
                if self.buffer.len() >= self.max_payload {
                    self.reset();
                    return Err(ProtocolError::PayloadTooLarge { max: self.max_payload });
                }
                self.buffer.put_u8(byte);
                Ok(None)
            },
        }
    }

    /// Drop any partial capture and go back to idle.
    ///
    /// Returns the number of discarded bytes.
    pub fn reset(&mut self) -> usize {
        let discarded = self.buffer.len();
        self.buffer.clear();
        self.state = ExtractorState::Idle;
        discarded
    }
}

impl Default for FrameExtractor {
    fn default() -> Self {
        Self::new()
    }
}
