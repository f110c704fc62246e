//! High-level bus interface

use tracing::{debug, info, trace, warn};

use cds55xx_core::{
    Packet, Payload, PosSpeedEntry, SpeedEntry, constants::DEFAULT_BAUD_RATE, encoder,
};
use cds55xx_transport::{SerialTransport, Transport};
use cds55xx_types::{ServoId, ServoMode};

use crate::error::Result;

/// CDS55xx servo bus
///
/// Encodes servo commands and writes them to the transport it owns. Every
/// call sends exactly one packet; transport failures are returned unchanged
/// and nothing is retried.
///
/// # Examples
///
/// ```no_run
/// use cds55xx::{Bus, PosSpeedEntry, ServoId};
///
/// #[tokio::main]
/// async fn main() -> cds55xx::Result<()> {
///     let mut bus = Bus::new("/dev/ttyUSB0");
///     bus.connect().await?;
///
///     let left = ServoId::new(1)?;
///     let right = ServoId::new(2)?;
///     bus.sync_write_pos_speed(&[
///         PosSpeedEntry::new(left, 300, 200),
///         PosSpeedEntry::new(right, 700, 200),
///     ])
///     .await?;
///
///     bus.disconnect().await?;
///     Ok(())
/// }
/// ```
pub struct Bus {
    transport: Box<dyn Transport>,
}

impl Bus {
    /// Create a bus on a serial port at the default speed (1 Mbps)
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_baud_rate(path, DEFAULT_BAUD_RATE)
    }

    /// Create a bus on a serial port at a custom speed
    pub fn with_baud_rate(path: impl Into<String>, baud_rate: u32) -> Self {
        Self::with_transport(SerialTransport::new(path, baud_rate))
    }

    /// Create a bus over any transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Open the transport
    pub async fn connect(&mut self) -> Result<()> {
        info!("Connecting to {}...", self.transport.endpoint());

        self.transport.connect().await?;

        info!("Connected");
        Ok(())
    }

    /// Close the transport
    pub async fn disconnect(&mut self) -> Result<()> {
        if !self.is_connected() {
            return Ok(());
        }

        info!("Disconnecting from {}...", self.transport.endpoint());

        self.transport.disconnect().await?;

        info!("Disconnected");
        Ok(())
    }

    /// Set the operating mode of one servo
    ///
    /// Motor mode is sent as requested, but the hardware is known not to
    /// apply it.
    pub async fn set_mode(&mut self, id: ServoId, mode: ServoMode) -> Result<()> {
        if mode == ServoMode::Motor {
            warn!(servo = %id, "Motor mode is not applied by CDS55xx hardware");
        }

        self.send_payload(encoder::encode_set_mode(id, mode)).await
    }

    /// Move one servo to `position` (0..=1023) at `speed` (0..=1023)
    pub async fn set_position(&mut self, id: ServoId, position: u16, speed: u16) -> Result<()> {
        self.send_payload(encoder::encode_set_position(id, position, speed))
            .await
    }

    /// Rotate one servo at a signed `speed` (-1023..=1023)
    pub async fn set_speed(&mut self, id: ServoId, speed: i16) -> Result<()> {
        self.send_payload(encoder::encode_set_speed(id, speed)).await
    }

    /// Move several servos with one synchronized write
    pub async fn sync_write_pos_speed(&mut self, entries: &[PosSpeedEntry]) -> Result<()> {
        let payload = encoder::encode_sync_write_pos_speed(entries)?;
        self.send_payload(payload).await
    }

    /// Rotate several servos with one synchronized write
    pub async fn sync_write_speed(&mut self, entries: &[SpeedEntry]) -> Result<()> {
        let payload = encoder::encode_sync_write_speed(entries)?;
        self.send_payload(payload).await
    }

    /// Frame and send an already encoded payload
    pub async fn send_payload(&mut self, payload: Payload) -> Result<()> {
        if payload.adjusted_entries() > 0 {
            debug!(
                adjusted = payload.adjusted_entries(),
                "Sending payload with clamped values"
            );
        }

        self.send_packet(&Packet::new(payload)).await
    }

    /// Send a complete packet
    pub async fn send_packet(&mut self, packet: &Packet) -> Result<()> {
        trace!("Sending: {:?}", packet);

        let data = packet.encode();
        self.transport.send(&data).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use cds55xx_transport::MemoryTransport;
    use mockall::mock;
    use pretty_assertions::assert_eq;

    use crate::error::Error;

    mock! {
        pub Link {}

        #[async_trait]
        impl Transport for Link {
            async fn connect(&mut self) -> cds55xx_transport::Result<()>;
            async fn disconnect(&mut self) -> cds55xx_transport::Result<()>;
            fn is_connected(&self) -> bool;
            async fn send(&mut self, data: &[u8]) -> cds55xx_transport::Result<()>;
            fn endpoint(&self) -> String;
        }
    }

    fn servo(id: u8) -> ServoId {
        ServoId::new(id).unwrap()
    }

    async fn memory_bus() -> (Bus, MemoryTransport) {
        let transport = MemoryTransport::new();
        let handle = transport.clone();

        let mut bus = Bus::with_transport(transport);
        bus.connect().await.unwrap();

        (bus, handle)
    }

    #[test]
    fn test_bus_create() {
        let bus = Bus::new("/dev/ttyUSB0");
        assert!(!bus.is_connected());
    }

    #[tokio::test]
    async fn test_bus_set_mode_frame() {
        let (mut bus, frames) = memory_bus().await;

        bus.set_mode(servo(3), ServoMode::Servo).await.unwrap();

        assert_eq!(
            frames.frames()[0].as_ref(),
            &[0xFF, 0xFF, 3, 4, 3, 0x18, 0, 0xDD]
        );
    }

    #[tokio::test]
    async fn test_bus_set_mode_motor_still_sent() {
        let (mut bus, frames) = memory_bus().await;

        bus.set_mode(servo(3), ServoMode::Motor).await.unwrap();

        assert_eq!(frames.frames()[0][6], 0x01);
    }

    #[tokio::test]
    async fn test_bus_set_position_frame() {
        let (mut bus, frames) = memory_bus().await;

        bus.set_position(servo(3), 384, 512).await.unwrap();

        assert_eq!(
            frames.frames()[0].as_ref(),
            &[0xFF, 0xFF, 0xFE, 9, 0x83, 0x1E, 0x04, 3, 0x80, 0x01, 0x00, 0x02, 0xCD]
        );
    }

    #[tokio::test]
    async fn test_bus_one_frame_per_call() {
        let (mut bus, frames) = memory_bus().await;

        bus.set_position(servo(3), 384, 512).await.unwrap();
        bus.set_position(servo(3), 768, 512).await.unwrap();
        bus.set_speed(servo(4), -200).await.unwrap();
        bus.sync_write_speed(&[]).await.unwrap();

        assert_eq!(frames.frame_count(), 4);
    }

    #[tokio::test]
    async fn test_bus_sync_write_clamps() {
        let (mut bus, frames) = memory_bus().await;

        bus.sync_write_pos_speed(&[PosSpeedEntry::new(servo(1), 2000, 100)])
            .await
            .unwrap();

        let sent = frames.frames();
        assert_eq!(&sent[0][8..10], &[0xFF, 0x03]);
        assert!(cds55xx_core::checksum::verify(&sent[0]));
    }

    #[tokio::test]
    async fn test_bus_too_many_entries_sends_nothing() {
        let (mut bus, frames) = memory_bus().await;

        let entries: Vec<_> = (0..60u8).map(|i| SpeedEntry::new(servo(i), 10)).collect();
        let result = bus.sync_write_speed(&entries).await;

        assert!(matches!(
            result,
            Err(Error::Core(cds55xx_core::Error::TooManyEntries { count: 60, .. }))
        ));
        assert_eq!(frames.frame_count(), 0);
    }

    #[tokio::test]
    async fn test_bus_not_connected() {
        let mut bus = Bus::with_transport(MemoryTransport::new());

        let result = bus.set_speed(servo(1), 100).await;

        assert!(matches!(
            result,
            Err(Error::Transport(cds55xx_transport::Error::NotConnected))
        ));
    }

    #[tokio::test]
    async fn test_bus_transport_error_propagates_without_retry() {
        let mut link = MockLink::new();
        link.expect_send()
            .withf(|data| data.len() == 13)
            .times(1)
            .returning(|_| {
                Err(cds55xx_transport::Error::WriteTimeout(Duration::from_millis(
                    10,
                )))
            });

        let mut bus = Bus::with_transport(link);
        let result = bus.set_position(servo(3), 384, 512).await;

        let err = result.unwrap_err();
        assert!(err.is_transport());
        assert!(matches!(
            err,
            Error::Transport(cds55xx_transport::Error::WriteTimeout(_))
        ));
    }

    #[tokio::test]
    async fn test_bus_disconnect() {
        let (mut bus, _frames) = memory_bus().await;
        assert!(bus.is_connected());

        bus.disconnect().await.unwrap();
        assert!(!bus.is_connected());

        // Disconnecting twice is a no-op
        bus.disconnect().await.unwrap();
    }

    // Hardware tests require a servo on /dev/ttyUSB0
    #[tokio::test]
    #[ignore] // Only run with real hardware
    async fn test_bus_hardware_sweep() {
        let mut bus = Bus::new("/dev/ttyUSB0");
        bus.connect().await.unwrap();

        bus.set_mode(servo(3), ServoMode::Servo).await.unwrap();
        bus.set_position(servo(3), 384, 512).await.unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        bus.set_position(servo(3), 768, 512).await.unwrap();

        bus.disconnect().await.unwrap();
    }
}
