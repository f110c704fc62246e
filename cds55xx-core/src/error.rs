//! Error types for cds55xx-core

/// Result type alias for cds55xx-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Synchronized write addresses more servos than the length byte can describe
    #[error("Too many servos in synchronized write: {count} (max: {max})")]
    TooManyEntries {
        count: usize,
        max: usize,
    },

    /// Parameters do not fit behind a one-byte length field
    #[error("Payload too large: {size} parameter bytes (max: {max} bytes)")]
    PayloadTooLarge {
        size: usize,
        max: usize,
    },

    /// Unknown instruction code
    #[error("Unknown instruction code: 0x{0:02X}")]
    UnknownInstruction(u8),
}
