//! # cds55xx-core
//!
//! Packet construction for the CDS55xx serial servo bus.
//!
//! This crate provides the low-level protocol primitives:
//! - Checksum calculation
//! - Frame building (header, payload, checksum)
//! - Instruction definitions and register constants
//! - Instruction encoders (set mode, synchronized writes)
//!
//! Nothing here performs I/O; encoded frames are handed to a transport.

pub mod checksum;
pub mod constants;
pub mod encoder;
pub mod error;
pub mod instruction;
pub mod packet;
pub mod payload;

pub use encoder::{PosSpeedEntry, SpeedEntry};
pub use error::{Error, Result};
pub use instruction::Instruction;
pub use packet::{Packet, build_packet};
pub use payload::Payload;
