//! Sweep one servo between two positions
//!
//! Set `CDS55XX_PORT` and `CDS55XX_SERVO_ID` to match your setup.
//! Without a port, frames go to an in-memory transport and are printed.

use std::time::Duration;

use anyhow::Context;
use tokio::time::sleep;
use tracing_subscriber::EnvFilter;

use cds55xx::{Bus, MemoryTransport, ServoId, ServoMode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let id: u8 = std::env::var("CDS55XX_SERVO_ID")
        .unwrap_or_else(|_| "3".to_string())
        .parse()
        .context("CDS55XX_SERVO_ID must be a number")?;
    let servo = ServoId::new(id)?;

    let memory = MemoryTransport::new();
    let (mut bus, dry_run) = match std::env::var("CDS55XX_PORT") {
        Ok(port) => (Bus::new(port), false),
        Err(_) => (Bus::with_transport(memory.clone()), true),
    };

    bus.connect().await.context("failed to open servo bus")?;

    // Servos need a moment after power-up before they accept commands
    sleep(Duration::from_secs(2)).await;

    bus.set_mode(servo, ServoMode::Servo).await?;

    let cycles = if dry_run { 2 } else { usize::MAX };
    for _ in 0..cycles {
        bus.set_position(servo, 384, 512).await?;
        sleep(Duration::from_secs(1)).await;
        bus.set_position(servo, 768, 512).await?;
        sleep(Duration::from_secs(1)).await;
    }

    for frame in memory.frames() {
        println!("{:02X?}", frame.as_ref());
    }

    bus.disconnect().await?;
    Ok(())
}
