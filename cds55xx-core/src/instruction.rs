//! Instruction codes

use std::fmt;

use crate::error::{Error, Result};

/// Instruction byte following the length field
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Instruction {
    /// Read registers from one servo
    Read = 0x02,

    /// Write registers of one servo
    Write = 0x03,

    /// Write the same register block of several servos in one packet
    SyncWrite = 0x83,
}

impl Instruction {
    /// Get instruction name
    pub fn name(self) -> &'static str {
        match self {
            Self::Read => "INST_READ",
            Self::Write => "INST_WRITE",
            Self::SyncWrite => "INST_SYNC_WRITE",
        }
    }
}

impl From<Instruction> for u8 {
    fn from(inst: Instruction) -> u8 {
        inst as u8
    }
}

impl TryFrom<u8> for Instruction {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x02 => Ok(Self::Read),
            0x03 => Ok(Self::Write),
            0x83 => Ok(Self::SyncWrite),
            _ => Err(Error::UnknownInstruction(value)),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), *self as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_conversion() {
        assert_eq!(u8::from(Instruction::Read), 0x02);
        assert_eq!(u8::from(Instruction::Write), 0x03);
        assert_eq!(u8::from(Instruction::SyncWrite), 0x83);
        assert_eq!(Instruction::try_from(0x83).unwrap(), Instruction::SyncWrite);
    }

    #[test]
    fn test_unknown_instruction() {
        let result = Instruction::try_from(0x01);
        assert!(matches!(result, Err(Error::UnknownInstruction(0x01))));
    }

    #[test]
    fn test_instruction_display() {
        assert_eq!(Instruction::SyncWrite.to_string(), "INST_SYNC_WRITE(0x83)");
    }
}
