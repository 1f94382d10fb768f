//! Random payloads through the line parser.
//!
//! Parsing must never panic, and every accepted record must coerce or fail
//! with a field error, never panic either.

#![no_main]

use chrono::Utc;
use libfuzzer_sys::fuzz_target;
use teleinfo_proto::parse_frame;

fuzz_target!(|data: &[u8]| {
    if let Ok(record) = parse_frame(data, Utc::now()) {
        for label in record.labels() {
            assert!(record.raw(label).is_some());
        }
        let _ = record.format_fields();
        let _ = record.to_string();
    }
});
