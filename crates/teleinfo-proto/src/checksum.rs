//! Teleinfo line checksum.
//!
//! The checksum covers every byte of a line up to, but not including, the
//! space that separates the value from the checksum byte:
//!
//! ```text
//! ((sum of covered bytes) & 0x3F) + 0x20
//! ```
//!
//! The result always falls in the printable range `0x20..=0x5F`.

/// Mask applied to the byte sum.
const MASK: u32 = 0x3F;

/// Offset that moves the masked sum into the printable range.
const OFFSET: u8 = 0x20;

/// Compute the checksum of `covered`, the line bytes before the trailing
/// `<SP><CHECKSUM>`.
pub fn compute(covered: &[u8]) -> u8 {
    let sum = covered.iter().fold(0u32, |acc, &b| acc.wrapping_add(u32::from(b)));
    (sum & MASK) as u8 + OFFSET
}
