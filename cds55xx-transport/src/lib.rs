//! Transport layer for the CDS55xx servo bus
//!
//! The encoder only needs a byte sink. This crate defines that capability
//! and provides a serial port implementation plus an in-memory one.

pub mod error;
pub mod memory;
pub mod serial;

pub use error::{Error, Result};
pub use memory::MemoryTransport;
pub use serial::SerialTransport;

use async_trait::async_trait;

/// Byte sink for encoded packets
///
/// `send` writes one complete frame; a frame is either fully written or the
/// call fails. Implementations do not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open the underlying link
    async fn connect(&mut self) -> Result<()>;

    /// Close the underlying link
    async fn disconnect(&mut self) -> Result<()>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Send raw bytes
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Human-readable name of the link (port path, etc.)
    fn endpoint(&self) -> String;
}
