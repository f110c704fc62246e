//! Range-limited register values
//!
//! Position and speed registers are 10 bits wide. Raw caller values are fitted
//! into range with `clamp`, which never fails and records whether the value
//! had to be adjusted. `new` is the strict alternative.

use std::fmt;

use crate::error::{Error, Result};

/// A value fitted into its register range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clamped<T> {
    pub value: T,

    /// True when the raw input was outside the range
    pub adjusted: bool,
}

impl<T> Clamped<T> {
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Goal position, 0..=1023
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position(u16);

impl Position {
    pub const MAX: u16 = 1023;

    pub fn new(raw: u16) -> Result<Self> {
        if raw > Self::MAX {
            return Err(out_of_range(raw as i32, 0, Self::MAX as i32));
        }
        Ok(Self(raw))
    }

    /// Cap `raw` at 1023
    pub fn clamp(raw: u16) -> Clamped<Self> {
        Clamped {
            value: Self(raw.min(Self::MAX)),
            adjusted: raw > Self::MAX,
        }
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

/// Unsigned moving speed, 0..=1023
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Speed(u16);

impl Speed {
    pub const MAX: u16 = 1023;

    pub fn new(raw: u16) -> Result<Self> {
        if raw > Self::MAX {
            return Err(out_of_range(raw as i32, 0, Self::MAX as i32));
        }
        Ok(Self(raw))
    }

    pub fn clamp(raw: u16) -> Clamped<Self> {
        Clamped {
            value: Self(raw.min(Self::MAX)),
            adjusted: raw > Self::MAX,
        }
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

/// Signed rotation speed, -1023..=1023
///
/// On the wire bit 10 carries the direction: negative speeds are sent as
/// `abs(speed) + 1024`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SignedSpeed(i16);

impl SignedSpeed {
    pub const MAX: i16 = 1023;
    pub const MIN: i16 = -1023;

    /// Direction flag added to the magnitude of negative speeds
    pub const DIRECTION_BIT: u16 = 1024;

    pub fn new(raw: i16) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&raw) {
            return Err(out_of_range(raw as i32, Self::MIN as i32, Self::MAX as i32));
        }
        Ok(Self(raw))
    }

    pub fn clamp(raw: i16) -> Clamped<Self> {
        Clamped {
            value: Self(raw.clamp(Self::MIN, Self::MAX)),
            adjusted: !(Self::MIN..=Self::MAX).contains(&raw),
        }
    }

    pub fn get(self) -> i16 {
        self.0
    }

    /// 16-bit register value
    ///
    /// # Examples
    ///
    /// ```
    /// use cds55xx_types::SignedSpeed;
    ///
    /// assert_eq!(SignedSpeed::new(500).unwrap().to_wire(), 500);
    /// assert_eq!(SignedSpeed::new(-500).unwrap().to_wire(), 1524);
    /// ```
    pub fn to_wire(self) -> u16 {
        if self.0 >= 0 {
            self.0 as u16
        } else {
            self.0.unsigned_abs() + Self::DIRECTION_BIT
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SignedSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn out_of_range(value: i32, min: i32, max: i32) -> Error {
    Error::OutOfRange { value, min, max }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_position_clamp() {
        let clamped = Position::clamp(2000);
        assert_eq!(clamped.value.get(), 1023);
        assert!(clamped.adjusted);

        let kept = Position::clamp(384);
        assert_eq!(kept.value.get(), 384);
        assert!(!kept.adjusted);
    }

    #[test]
    fn test_position_strict() {
        assert!(Position::new(1023).is_ok());
        assert_eq!(
            Position::new(1024),
            Err(Error::OutOfRange { value: 1024, min: 0, max: 1023 })
        );
    }

    #[test]
    fn test_speed_clamp_boundary() {
        assert!(!Speed::clamp(1023).adjusted);
        assert!(Speed::clamp(1024).adjusted);
    }

    #[test]
    fn test_signed_speed_wire_encoding() {
        assert_eq!(SignedSpeed::new(0).unwrap().to_wire(), 0);
        assert_eq!(SignedSpeed::new(500).unwrap().to_wire(), 500);
        assert_eq!(SignedSpeed::new(-500).unwrap().to_wire(), 1524);
        assert_eq!(SignedSpeed::new(-1023).unwrap().to_wire(), 2047);
    }

    #[test]
    fn test_signed_speed_clamp_extremes() {
        let low = SignedSpeed::clamp(i16::MIN);
        assert_eq!(low.value.get(), -1023);
        assert!(low.adjusted);

        let high = SignedSpeed::clamp(i16::MAX);
        assert_eq!(high.value.get(), 1023);
        assert!(high.adjusted);
    }

    proptest! {
        #[test]
        fn prop_position_clamp_in_range(raw in any::<u16>()) {
            let clamped = Position::clamp(raw);
            prop_assert!(clamped.value.get() <= Position::MAX);
            prop_assert_eq!(clamped.adjusted, raw > Position::MAX);
        }

        #[test]
        fn prop_signed_speed_wire_fits_11_bits(raw in any::<i16>()) {
            let wire = SignedSpeed::clamp(raw).value.to_wire();
            prop_assert!(wire < 2048);
            prop_assert_eq!(wire & SignedSpeed::DIRECTION_BIT != 0, raw < 0);
        }
    }
}
