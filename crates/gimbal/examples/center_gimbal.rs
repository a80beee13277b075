//! Basic gimbal control example.
//!
//! Sets the rocker speed, pans right for two seconds by resending the
//! direction control every 100 ms, stops, and finally recenters. A
//! [`TelemetrySink`] prints acknowledgements as they arrive.
//!
//! # Requirements
//!
//! - A HeQi payload reachable at 192.168.144.64:5000
//!
//! # Usage
//!
//! ```sh
//! cargo run -p gimbal --example center_gimbal
//! ```

use std::sync::Arc;
use std::time::Duration;

use gimbal::heqi::{ControlDefaults, SessionBuilder, commands};
use gimbal::{AckCode, Direction, GimbalMode, TelemetrySink};

struct AckPrinter;

impl TelemetrySink for AckPrinter {
    fn on_ack(&self, message_id: u32, code: AckCode) {
        let name = commands::message_name(message_id).unwrap_or("unknown");
        println!("  ack: {} ({:06X}) -> {}", name, message_id, code);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let session = Arc::new(
        SessionBuilder::new()
            .peer(ControlDefaults::peer())
            .sink(Arc::new(AckPrinter))
            .build()?,
    );
    session.connect().await?;
    println!("Connected to {}", session.peer());

    println!("Setting speed to {}...", ControlDefaults::SPEED);
    session
        .send_command(|seq| {
            commands::cmd_gimbal_set_speed(seq, ControlDefaults::SPEED, ControlDefaults::SPEED)
        })
        .await;

    // Held directions are resent on a fixed period, like a rocker held down.
    println!("Panning right for 2 s...");
    let mut ticker = tokio::time::interval(ControlDefaults::CONTROL_REPEAT_INTERVAL);
    let until = tokio::time::Instant::now() + Duration::from_secs(2);
    while tokio::time::Instant::now() < until {
        ticker.tick().await;
        session
            .send_command(|seq| {
                commands::cmd_gimbal_control(seq, GimbalMode::None, Direction::RIGHT, Direction::Stop)
            })
            .await;
    }
    session.send_command(commands::cmd_gimbal_stop).await;

    println!("Centering...");
    session.send_command(commands::cmd_gimbal_center).await;

    tokio::time::sleep(Duration::from_millis(500)).await;
    session.disconnect().await;
    println!("Done.");
    Ok(())
}
