//! In-memory transport
//!
//! Captures every frame instead of writing it to a port. Clones share the
//! captured frames, so a handle kept by a test still sees what was sent after
//! the transport has been moved into a `Bus`.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::{Transport, error::*};

/// Transport that records sent frames
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    frames: Arc<Mutex<Vec<Bytes>>>,
    connected: bool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames sent so far, oldest first
    pub fn frames(&self) -> Vec<Bytes> {
        self.frames.lock().clone()
    }

    /// Remove and return the frames sent so far
    pub fn take_frames(&self) -> Vec<Bytes> {
        std::mem::take(&mut *self.frames.lock())
    }

    /// Number of frames sent so far
    pub fn frame_count(&self) -> usize {
        self.frames.lock().len()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn connect(&mut self) -> Result<()> {
        if self.connected {
            return Err(Error::AlreadyConnected);
        }

        debug!("Memory transport connected");
        self.connected = true;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        if !self.connected {
            return Err(Error::NotConnected);
        }

        trace!("Captured {} bytes: {:02X?}", data.len(), data);

        self.frames.lock().push(Bytes::copy_from_slice(data));
        Ok(())
    }

    fn endpoint(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_transport_records_frames() {
        let mut transport = MemoryTransport::new();
        transport.connect().await.unwrap();

        transport.send(&[0xFF, 0xFF, 1]).await.unwrap();
        transport.send(&[0xFF, 0xFF, 2]).await.unwrap();

        let frames = transport.frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].as_ref(), &[0xFF, 0xFF, 2]);
    }

    #[tokio::test]
    async fn test_memory_transport_clone_shares_frames() {
        let mut transport = MemoryTransport::new();
        let handle = transport.clone();

        transport.connect().await.unwrap();
        transport.send(&[0xAA]).await.unwrap();

        assert_eq!(handle.frame_count(), 1);
        assert_eq!(handle.take_frames().len(), 1);
        assert_eq!(transport.frame_count(), 0);
    }

    #[tokio::test]
    async fn test_memory_transport_requires_connect() {
        let mut transport = MemoryTransport::new();
        let result = transport.send(&[0xAA]).await;
        assert!(matches!(result, Err(Error::NotConnected)));
    }

    #[tokio::test]
    async fn test_memory_transport_double_connect() {
        let mut transport = MemoryTransport::new();
        transport.connect().await.unwrap();
        assert!(matches!(transport.connect().await, Err(Error::AlreadyConnected)));
    }
}
