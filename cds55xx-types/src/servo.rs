//! Servo addressing and operating modes

use std::fmt;

use crate::error::{Error, Result};

/// Address of a single servo on the bus
///
/// Valid ids are 0..=253. 0xFE is the broadcast address and 0xFF is the
/// frame header byte, so neither can name an individual servo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServoId(u8);

impl ServoId {
    /// Highest individually addressable id
    pub const MAX: u8 = 253;

    /// Create a servo id, rejecting reserved addresses
    ///
    /// # Examples
    ///
    /// ```
    /// use cds55xx_types::ServoId;
    ///
    /// assert!(ServoId::new(3).is_ok());
    /// assert!(ServoId::new(0xFE).is_err());
    /// ```
    pub fn new(id: u8) -> Result<Self> {
        if id > Self::MAX {
            return Err(Error::Validation(format!(
                "servo id 0x{:02X} is reserved (valid range 0..={})",
                id,
                Self::MAX
            )));
        }
        Ok(Self(id))
    }

    /// Raw id byte as sent on the wire
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ServoId {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ServoId> for u8 {
    fn from(id: ServoId) -> u8 {
        id.0
    }
}

impl fmt::Display for ServoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Operating mode written to the mode register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ServoMode {
    /// Position control (default)
    #[default]
    Servo = 0x00,

    /// Continuous rotation.
    ///
    /// Known hardware caveat: CDS55xx servos accept the register write but do
    /// not switch into motor mode. The value is still encoded and sent as-is.
    Motor = 0x01,
}

impl ServoMode {
    /// Register value for this mode
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Servo => "servo",
            Self::Motor => "motor",
        }
    }
}

impl fmt::Display for ServoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
