//! Serial-line source.

use std::{io, time::Duration};

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::debug;

use super::{ByteSource, ReadOutcome, read_outcome};

/// Serial line parameters.
///
/// Defaults match the historic teleinfo output: 1200 baud, 7-bit words,
/// one stop bit, no parity bit handling, no flow control. Reads give up
/// after 30 seconds without a byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    /// Line speed
    pub baud_rate: u32,
    /// Word size
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Stop bits
    pub stop_bits: StopBits,
    /// How long a read may block without receiving a byte
    pub timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 1200,
            data_bits: DataBits::Seven,
            parity: Parity::None,
            stop_bits: StopBits::One,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Reads from a serial device.
pub struct SerialSource {
    port: Option<Box<dyn SerialPort>>,
    path: String,
}

impl SerialSource {
    /// Open the serial device at `path` with the given line parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the device does not exist, is busy, or rejects
    /// the line settings.
    pub fn open(path: &str, config: &SerialConfig) -> io::Result<Self> {
        let port = serialport::new(path, config.baud_rate)
            .data_bits(config.data_bits)
            .parity(config.parity)
            .stop_bits(config.stop_bits)
            .flow_control(FlowControl::None)
            .timeout(config.timeout)
            .open()?;

        debug!(path, baud_rate = config.baud_rate, timeout = ?config.timeout, "opened serial port");
        Ok(Self { port: Some(port), path: path.to_string() })
    }

    /// Device path this source was opened on.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Debug for SerialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialSource")
            .field("path", &self.path)
            .field("open", &self.port.is_some())
            .finish()
    }
}

impl ByteSource for SerialSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<ReadOutcome> {
        match self.port.as_mut() {
            Some(port) => read_outcome(&mut **port, buf),
            None => Ok(ReadOutcome::Closed),
        }
    }

    fn close(&mut self) -> io::Result<()> {
        if self.port.take().is_some() {
            debug!(path = %self.path, "closed serial port");
        }
        Ok(())
    }
}
