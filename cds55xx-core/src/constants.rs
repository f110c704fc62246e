//! Protocol constants

/// Frame header preceding every packet
pub const HEADER: [u8; 2] = [0xFF, 0xFF];

/// Address processed by every servo on the bus
pub const BROADCAST_ID: u8 = 0xFE;

/// Default bus speed (bits per second)
pub const DEFAULT_BAUD_RATE: u32 = 1_000_000;

/// Default transport write timeout (milliseconds)
pub const DEFAULT_WRITE_TIMEOUT_MS: u64 = 1000;

/// Register addresses
pub mod registers {
    /// Operating mode (servo / motor)
    pub const MODE: u8 = 0x18;

    /// Goal position, followed by moving speed (2 bytes each, little-endian)
    pub const GOAL_POSITION: u8 = 0x1E;

    /// Per-servo data length sent in synchronized writes.
    ///
    /// Each entry actually occupies `SYNC_ENTRY_SIZE` bytes on the wire; the
    /// literal 0x04 is what the servos have been observed to accept.
    pub const SYNC_DATA_LENGTH: u8 = 0x04;
}

/// Bytes per servo in a synchronized write: id + two 16-bit words
pub const SYNC_ENTRY_SIZE: usize = 5;

/// Position field sent in speed-only synchronized writes (ignored by the servo)
pub const SPEED_ONLY_POSITION: u16 = 0x0200;

/// Largest value the length byte can carry
pub const MAX_LENGTH: usize = u8::MAX as usize;

/// Servos that fit in one synchronized write.
///
/// Length is `2 + 2 + 5 * n`, which must stay within one byte.
pub const MAX_SYNC_ENTRIES: usize = (MAX_LENGTH - 4) / SYNC_ENTRY_SIZE;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_sync_entries() {
        assert_eq!(MAX_SYNC_ENTRIES, 50);
        assert!(4 + SYNC_ENTRY_SIZE * MAX_SYNC_ENTRIES <= MAX_LENGTH);
    }
}
