//! Teleinfo dump tool.
//!
//! Reads frames from a serial device (or a recorded capture) and prints
//! one JSON point per frame on stdout. Logs go to stderr.

mod args;
mod output;

use std::{
    io,
    sync::atomic::{AtomicBool, Ordering},
};

use anyhow::{Context, Result};
use clap::Parser;
use teleinfo_core::{ByteSource, FileSource, SerialSource, TeleinfoReader, run};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    args::Args,
    output::{PointSink, PointWriter},
};

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let source: Box<dyn ByteSource> = match &args.file {
        Some(path) => Box::new(
            FileSource::open(path).with_context(|| format!("opening {}", path.display()))?,
        ),
        None => {
            let serial = SerialSource::open(&args.device, &args.serial_config())
                .with_context(|| format!("opening {}", args.device))?;
            info!(device = serial.path(), baud = args.baud, "reading serial device");
            Box::new(serial)
        },
    };

    let mut reader = TeleinfoReader::with_config(source, args.reader_config());
    let writer = PointWriter::new(io::stdout().lock(), args.measurement.as_str());
    let mut sink = PointSink::new(writer, args.max_frames);
    let stop = AtomicBool::new(sink.is_done());

    let summary = run(&mut reader, &stop, |record| {
        sink.accept(&record);
        if sink.is_done() {
            stop.store(true, Ordering::Release);
        }
    })?;

    let written = sink.finish().context("writing output")?;

    info!(
        reason = ?summary.reason,
        frames = summary.stats.frames,
        written,
        dropped = summary.stats.dropped,
        timeouts = summary.stats.timeouts,
        "done"
    );
    Ok(())
}
