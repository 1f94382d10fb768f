//! Builders for teleinfo wire data.
//!
//! Frames are laid out the way meters send them:
//!
//! ```text
//! STX  LF <line> CR  LF <line> CR ...  ETX
//! ```

use teleinfo_proto::{FRAME_END, FRAME_START, checksum};

/// A `<LABEL> <VALUE> <CHECKSUM>` line with a correct checksum.
pub fn line(label: &str, value: &str) -> Vec<u8> {
    let mut line = format!("{label} {value}").into_bytes();
    let sum = checksum::compute(&line);
    line.push(b' ');
    line.push(sum);
    line
}

/// A line whose checksum byte is off by one.
pub fn corrupt_line(label: &str, value: &str) -> Vec<u8> {
    let mut line = line(label, value);
    if let Some(sum) = line.last_mut() {
        *sum = if *sum == 0x5F { 0x20 } else { *sum + 1 };
    }
    line
}

/// Frame body (without markers) from raw lines.
pub fn payload_from_lines(lines: &[Vec<u8>]) -> Vec<u8> {
    let mut payload = Vec::new();
    for line in lines {
        payload.push(b'\n');
        payload.extend_from_slice(line);
        payload.push(b'\r');
    }
    payload
}

/// Complete frame, markers included, from raw lines.
pub fn frame_from_lines(lines: &[Vec<u8>]) -> Vec<u8> {
    let mut frame = vec![FRAME_START];
    frame.extend(payload_from_lines(lines));
    frame.push(FRAME_END);
    frame
}

/// Complete frame, markers included, from label/value pairs.
///
/// Payload trimming removes a space checksum on the last line, so such a
/// line only parses in a non-final position.
pub fn frame(fields: &[(&str, &str)]) -> Vec<u8> {
    let lines: Vec<Vec<u8>> = fields.iter().map(|(label, value)| line(label, value)).collect();
    frame_from_lines(&lines)
}

/// Typical frame of a single-phase meter on the off-peak option.
pub fn meter_frame(hchc: u64, hchp: u64, papp: u32) -> Vec<u8> {
    let hchc = format!("{hchc:09}");
    let hchp = format!("{hchp:09}");
    let papp = format!("{papp:05}");
    frame(&[
        ("ADCO", "031762120483"),
        ("OPTARIF", "HC.."),
        ("ISOUSC", "30"),
        ("HCHC", hchc.as_str()),
        ("HCHP", hchp.as_str()),
        ("PTEC", "HP.."),
        ("IINST", "002"),
        ("IMAX", "090"),
        ("PAPP", papp.as_str()),
        ("HHPHC", "A"),
        ("MOTDETAT", "000000"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_has_valid_checksum() {
        assert_eq!(line("HCHC", "001234567"), b"HCHC 001234567 \"".to_vec());
    }

    #[test]
    fn corrupt_line_differs_only_in_checksum() {
        let good = line("PAPP", "00450");
        let bad = corrupt_line("PAPP", "00450");

        assert_eq!(good[..good.len() - 1], bad[..bad.len() - 1]);
        assert_ne!(good.last(), bad.last());
    }

    #[test]
    fn frame_layout() {
        assert_eq!(frame(&[("IINST", "002")]), b"\x02\nIINST 002 Y\r\x03".to_vec());
    }
}
