//! Frame builder: header, payload and checksum

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use tracing::trace;

use crate::{checksum, constants::HEADER, payload::Payload};

/// Wrap raw payload bytes into a transmittable frame
///
/// Prepends the 0xFF 0xFF header and appends the checksum.
///
/// # Examples
///
/// ```
/// use cds55xx_core::packet::build_packet;
///
/// let frame = build_packet(&[3, 4, 3, 0x18, 0]);
/// assert_eq!(frame.as_ref(), &[0xFF, 0xFF, 3, 4, 3, 0x18, 0, 0xDD]);
/// ```
pub fn build_packet(payload: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(Packet::OVERHEAD + payload.len());

    buf.put_slice(&HEADER);
    buf.put_slice(payload);

    let checksum = checksum::calculate(&buf);
    buf.put_u8(checksum);

    trace!("Built frame ({} bytes): {}", buf.len(), hex::encode(&buf));

    buf.freeze()
}

/// Bus packet
///
/// # Packet Structure
///
/// ```text
/// ┌───────────┬─────────┬────────┬─────────────┬──────────┬──────────┐
/// │  Header   │ Address │ Length │ Instruction │  Params  │ Checksum │
/// │ 0xFF 0xFF │ 1 byte  │ 1 byte │   1 byte    │ N bytes  │  1 byte  │
/// └───────────┴─────────┴────────┴─────────────┴──────────┴──────────┘
/// ```
///
/// Multi-byte parameter values are little-endian.
///
/// # Examples
///
/// ```
/// use cds55xx_core::{encoder, Packet};
/// use cds55xx_types::{ServoId, ServoMode};
///
/// let id = ServoId::new(3).unwrap();
/// let packet = Packet::new(encoder::encode_set_mode(id, ServoMode::Servo));
/// assert_eq!(packet.encode().as_ref(), &[0xFF, 0xFF, 3, 4, 3, 0x18, 0, 0xDD]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Packet {
    payload: Payload,
}

impl Packet {
    /// Header size in bytes
    pub const HEADER_SIZE: usize = HEADER.len();

    /// Header plus checksum
    pub const OVERHEAD: usize = Self::HEADER_SIZE + 1;

    pub fn new(payload: Payload) -> Self {
        Self { payload }
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }

    /// Calculate checksum for this packet
    pub fn checksum(&self) -> u8 {
        let mut buf = BytesMut::with_capacity(Self::HEADER_SIZE + self.payload.size());
        buf.put_slice(&HEADER);
        buf.put_slice(&self.payload.to_bytes());
        checksum::calculate(&buf)
    }

    /// Encode packet to bytes
    pub fn encode(&self) -> Bytes {
        build_packet(&self.payload.to_bytes())
    }

    /// Get total packet size
    pub fn size(&self) -> usize {
        Self::OVERHEAD + self.payload.size()
    }
}

impl From<Payload> for Packet {
    fn from(payload: Payload) -> Self {
        Self::new(payload)
    }
}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Packet")
            .field("payload", &self.payload)
            .field("checksum", &format!("0x{:02X}", self.checksum()))
            .field("size", &self.size())
            .finish()
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Packet[{}]", hex::encode_upper(self.encode()))
    }
}
