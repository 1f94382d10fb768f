//! Command-line arguments.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use teleinfo_core::{ReaderConfig, SerialConfig};

/// Read teleinfo frames and print one JSON point per frame.
#[derive(Debug, Parser)]
#[command(name = "teleinfo", version, about)]
pub struct Args {
    /// Serial device the meter is wired to
    #[arg(short, long, default_value = "/dev/ttyAMA0", conflicts_with = "file")]
    pub device: String,

    /// Replay a recorded capture instead of reading a serial device
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Measurement name attached to every point
    #[arg(short, long, default_value = "teleinfo")]
    pub measurement: String,

    /// Serial line speed
    #[arg(long, default_value_t = 1200)]
    pub baud: u32,

    /// Seconds a serial read may wait for data
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Stop after writing this many points
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Serial parameters, defaults overridden by the flags.
    pub fn serial_config(&self) -> SerialConfig {
        SerialConfig {
            baud_rate: self.baud,
            timeout: Duration::from_secs(self.timeout_secs),
            ..SerialConfig::default()
        }
    }

    /// Reader configuration
    pub fn reader_config(&self) -> ReaderConfig {
        ReaderConfig::default()
    }
}
