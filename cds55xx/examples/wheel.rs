//! Spin several servos with one synchronized speed write
//!
//! Note: CDS55xx servos ignore the motor-mode register write, so the servos
//! must already be configured for continuous rotation.

use std::time::Duration;

use tokio::time::sleep;

use cds55xx::{Bus, ServoId, SpeedEntry};

#[tokio::main]
async fn main() -> cds55xx::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let port = std::env::var("CDS55XX_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());

    let mut bus = Bus::new(port);
    bus.connect().await?;

    let left = ServoId::new(1)?;
    let right = ServoId::new(2)?;

    // Opposite directions so a two-wheeled base drives straight
    bus.sync_write_speed(&[SpeedEntry::new(left, 600), SpeedEntry::new(right, -600)])
        .await?;
    sleep(Duration::from_secs(3)).await;

    bus.sync_write_speed(&[SpeedEntry::new(left, 0), SpeedEntry::new(right, 0)])
        .await?;

    bus.disconnect().await?;
    Ok(())
}
