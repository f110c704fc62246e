//! Bus checksum
//!
//! The checksum byte covers everything after the two 0xFF header bytes up to
//! the last parameter:
//! 1. Sum address, length, instruction and parameter bytes
//! 2. Take ones-complement: ~sum
//! 3. Keep the low 8 bits

use tracing::trace;

use crate::constants::HEADER;

/// Calculate the checksum of a frame
///
/// `frame` is the buffer starting at the header, without the checksum byte.
/// Bytes before index 2 are never summed, so a header-only buffer yields 0xFF.
///
/// # Examples
///
/// ```
/// use cds55xx_core::checksum;
///
/// let frame = [0xFF, 0xFF, 3, 4, 3, 0x18, 0];
/// assert_eq!(checksum::calculate(&frame), 0xDD);
/// ```
pub fn calculate(frame: &[u8]) -> u8 {
    let body = frame.get(HEADER.len()..).unwrap_or(&[]);

    // Wrapping u8 addition keeps exactly the low 8 bits of the full sum
    let sum = body.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    let checksum = !sum;

    trace!(
        body_len = body.len(),
        checksum = format!("0x{:02X}", checksum),
        "Calculated checksum"
    );

    checksum
}

/// Verify the trailing checksum byte of a complete frame
pub fn verify(frame: &[u8]) -> bool {
    match frame.split_last() {
        Some((&received, rest)) if rest.len() >= HEADER.len() => calculate(rest) == received,
        _ => false,
    }
}
