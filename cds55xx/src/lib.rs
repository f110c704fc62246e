//! # cds55xx
//!
//! Rust driver for CDS55xx serial bus servos.
//!
//! ## Features
//!
//! - Byte-exact packet encoding (set mode, synchronized writes)
//! - Out-of-range positions and speeds clamped, never rejected
//! - Async/await API using Tokio
//! - Pluggable transport (serial port, in-memory)
//!
//! ## Quick Start
//!
//! ```no_run
//! use cds55xx::{Bus, ServoId, ServoMode};
//!
//! #[tokio::main]
//! async fn main() -> cds55xx::Result<()> {
//!     let mut bus = Bus::new("/dev/ttyUSB0");
//!     bus.connect().await?;
//!
//!     let servo = ServoId::new(3)?;
//!     bus.set_mode(servo, ServoMode::Servo).await?;
//!     bus.set_position(servo, 384, 512).await?;
//!
//!     bus.disconnect().await?;
//!     Ok(())
//! }
//! ```

pub mod bus;
pub mod error;

// Re-exports
pub use bus::Bus;
pub use error::{Error, Result};

pub use cds55xx_core::{Instruction, Packet, Payload, PosSpeedEntry, SpeedEntry};
pub use cds55xx_transport::{MemoryTransport, SerialTransport, Transport};
pub use cds55xx_types::{Position, ServoId, ServoMode, SignedSpeed, Speed};
