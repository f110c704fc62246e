//! Instruction encoders
//!
//! Each encoder turns a servo command into a [`Payload`]; wrap it in a
//! [`Packet`](crate::Packet) to get the bytes to put on the bus. Numeric
//! inputs are clamped into register range, never rejected. Clamps are logged
//! at debug level and counted in [`Payload::adjusted_entries`].

use bytes::{BufMut, BytesMut};
use tracing::debug;

use cds55xx_types::{Position, ServoId, ServoMode, SignedSpeed, Speed};

use crate::{
    constants::{BROADCAST_ID, MAX_SYNC_ENTRIES, SPEED_ONLY_POSITION, SYNC_ENTRY_SIZE, registers},
    error::{Error, Result},
    instruction::Instruction,
    payload::Payload,
};

/// Goal position and speed for one servo in a synchronized write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosSpeedEntry {
    pub id: ServoId,
    pub position: u16,
    pub speed: u16,
}

impl PosSpeedEntry {
    pub fn new(id: ServoId, position: u16, speed: u16) -> Self {
        Self { id, position, speed }
    }
}

/// Signed rotation speed for one servo in a synchronized write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedEntry {
    pub id: ServoId,
    pub speed: i16,
}

impl SpeedEntry {
    pub fn new(id: ServoId, speed: i16) -> Self {
        Self { id, speed }
    }
}

/// Write the operating mode of one servo
///
/// Produces `[id, 0x04, WRITE, MODE, mode]`.
///
/// [`ServoMode::Motor`] is encoded as 0x01 like any other value, but CDS55xx
/// hardware is known to ignore it: the servo stays in servo mode.
pub fn encode_set_mode(id: ServoId, mode: ServoMode) -> Payload {
    debug!(servo = %id, mode = %mode, "Encoding set-mode");

    let params = [registers::MODE, mode.value()];

    unwrap_fits(Payload::new(id.get(), Instruction::Write, params.to_vec()))
}

/// Set goal position and speed of several servos in one broadcast packet
///
/// Position and speed are capped at 1023. Entries are written in input order;
/// an empty slice yields a well-formed packet that moves nothing.
///
/// # Errors
///
/// [`Error::TooManyEntries`] when more than
/// [`MAX_SYNC_ENTRIES`](crate::constants::MAX_SYNC_ENTRIES) servos are given.
///
/// # Examples
///
/// ```
/// use cds55xx_core::encoder::{encode_sync_write_pos_speed, PosSpeedEntry};
/// use cds55xx_types::ServoId;
///
/// let id = ServoId::new(3).unwrap();
/// let payload = encode_sync_write_pos_speed(&[PosSpeedEntry::new(id, 384, 512)]).unwrap();
/// assert_eq!(
///     payload.to_bytes().as_ref(),
///     &[0xFE, 9, 0x83, 0x1E, 0x04, 3, 0x80, 0x01, 0x00, 0x02]
/// );
/// ```
pub fn encode_sync_write_pos_speed(entries: &[PosSpeedEntry]) -> Result<Payload> {
    let mut adjusted = 0;

    let payload = encode_sync_write(entries.len(), |buf| {
        for entry in entries {
            let position = Position::clamp(entry.position);
            let speed = Speed::clamp(entry.speed);

            if position.adjusted || speed.adjusted {
                adjusted += 1;
                debug!(
                    servo = %entry.id,
                    position = entry.position,
                    speed = entry.speed,
                    "Clamped position/speed to {}/{}",
                    position.value,
                    speed.value
                );
            }

            buf.put_u8(entry.id.get());
            buf.put_u16_le(position.value.get());
            buf.put_u16_le(speed.value.get());
        }
    })?;

    Ok(payload.with_adjusted(adjusted))
}

/// Set signed rotation speed of several servos in one broadcast packet
///
/// Speed is clamped to -1023..=1023 and sent with the direction bit encoding
/// (negative speeds as `abs(speed) + 1024`). The position word of each entry
/// is a fixed placeholder the servo ignores.
///
/// # Errors
///
/// [`Error::TooManyEntries`] when more than
/// [`MAX_SYNC_ENTRIES`](crate::constants::MAX_SYNC_ENTRIES) servos are given.
pub fn encode_sync_write_speed(entries: &[SpeedEntry]) -> Result<Payload> {
    let mut adjusted = 0;

    let payload = encode_sync_write(entries.len(), |buf| {
        for entry in entries {
            let speed = SignedSpeed::clamp(entry.speed);

            if speed.adjusted {
                adjusted += 1;
                debug!(
                    servo = %entry.id,
                    speed = entry.speed,
                    "Clamped speed to {}",
                    speed.value
                );
            }

            buf.put_u8(entry.id.get());
            buf.put_u16_le(SPEED_ONLY_POSITION);
            buf.put_u16_le(speed.value.to_wire());
        }
    })?;

    Ok(payload.with_adjusted(adjusted))
}

/// Set goal position and speed of a single servo
///
/// Sent as a one-entry synchronized write.
pub fn encode_set_position(id: ServoId, position: u16, speed: u16) -> Payload {
    unwrap_fits(encode_sync_write_pos_speed(&[PosSpeedEntry::new(id, position, speed)]))
}

/// Set signed rotation speed of a single servo
///
/// Sent as a one-entry synchronized write.
pub fn encode_set_speed(id: ServoId, speed: i16) -> Payload {
    unwrap_fits(encode_sync_write_speed(&[SpeedEntry::new(id, speed)]))
}

/// Shared synchronized-write framing: `[GOAL_POSITION, DATA_LEN, entries...]`
/// addressed to the broadcast id
fn encode_sync_write(count: usize, write_entries: impl FnOnce(&mut BytesMut)) -> Result<Payload> {
    if count > MAX_SYNC_ENTRIES {
        return Err(Error::TooManyEntries {
            count,
            max: MAX_SYNC_ENTRIES,
        });
    }

    let mut params = BytesMut::with_capacity(2 + count * SYNC_ENTRY_SIZE);
    params.put_u8(registers::GOAL_POSITION);
    params.put_u8(registers::SYNC_DATA_LENGTH);
    write_entries(&mut params);

    debug!(servos = count, "Encoding synchronized write");

    Payload::new(BROADCAST_ID, Instruction::SyncWrite, params.freeze())
}

/// Payloads whose size is fixed by construction always fit the length byte
fn unwrap_fits(result: Result<Payload>) -> Payload {
    match result {
        Ok(payload) => payload,
        Err(e) => unreachable!("fixed-size payload rejected: {e}"),
    }
}
