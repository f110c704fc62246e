//! Packet payload: everything between the header and the checksum

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    constants::MAX_LENGTH,
    error::{Error, Result},
    instruction::Instruction,
};

/// Packet payload
///
/// # Layout
///
/// ```text
/// ┌───────────┬───────────┬─────────────┬──────────────┐
/// │  Address  │  Length   │ Instruction │  Parameters  │
/// │  1 byte   │  1 byte   │   1 byte    │   N bytes    │
/// └───────────┴───────────┴─────────────┴──────────────┘
/// ```
///
/// Length counts the instruction, the parameters and the trailing checksum:
/// `N + 2`.
#[derive(Clone, PartialEq, Eq)]
pub struct Payload {
    address: u8,
    instruction: Instruction,
    params: Bytes,
    adjusted: usize,
}

impl Payload {
    /// Largest parameter block a payload can carry
    pub const MAX_PARAMS: usize = MAX_LENGTH - 2;

    /// Create a payload
    ///
    /// # Examples
    ///
    /// ```
    /// use cds55xx_core::{Instruction, Payload};
    ///
    /// let payload = Payload::new(3, Instruction::Write, vec![0x18, 0x00]).unwrap();
    /// assert_eq!(payload.to_bytes().as_ref(), &[3, 4, 3, 0x18, 0x00]);
    /// ```
    pub fn new(address: u8, instruction: Instruction, params: impl Into<Bytes>) -> Result<Self> {
        let params = params.into();
        if params.len() > Self::MAX_PARAMS {
            return Err(Error::PayloadTooLarge {
                size: params.len(),
                max: Self::MAX_PARAMS,
            });
        }

        Ok(Self {
            address,
            instruction,
            params,
            adjusted: 0,
        })
    }

    /// Record how many entries had numeric input clamped into range
    pub(crate) fn with_adjusted(mut self, adjusted: usize) -> Self {
        self.adjusted = adjusted;
        self
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn instruction(&self) -> Instruction {
        self.instruction
    }

    pub fn params(&self) -> &[u8] {
        &self.params
    }

    /// Value of the length field
    pub fn length(&self) -> u8 {
        // Bounded by MAX_PARAMS in `new`
        (self.params.len() + 2) as u8
    }

    /// Number of entries whose position or speed was clamped while encoding
    pub fn adjusted_entries(&self) -> usize {
        self.adjusted
    }

    /// Encoded size in bytes
    pub fn size(&self) -> usize {
        3 + self.params.len()
    }

    /// Encode payload to bytes
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.size());

        buf.put_u8(self.address);
        buf.put_u8(0); // Length placeholder
        buf.put_u8(self.instruction.into());
        buf.put_slice(&self.params);

        // Bytes after the length field, plus the checksum
        buf[1] = (buf.len() - 2 + 1) as u8;

        buf.freeze()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("address", &format!("0x{:02X}", self.address))
            .field("length", &self.length())
            .field("instruction", &self.instruction)
            .field("params", &hex::encode(&self.params))
            .field("adjusted", &self.adjusted)
            .finish()
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Payload[{}](addr=0x{:02X}, len={})",
            self.instruction,
            self.address,
            self.length()
        )
    }
}
