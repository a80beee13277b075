//! Monitor gimbal telemetry.
//!
//! Subscribes to the session event stream and prints every decoded event
//! for 30 seconds. The payload pushes attitude and camera status on its
//! own once it has seen a datagram from us, so a stop command is sent
//! first to make the payload learn our address.
//!
//! # Requirements
//!
//! - A HeQi payload reachable at 192.168.144.64:5000 (adjust below)
//!
//! # Usage
//!
//! ```sh
//! cargo run -p gimbal --example monitor_telemetry
//! ```

use std::sync::Arc;
use std::time::Duration;

use gimbal::GimbalEvent;
use gimbal::heqi::{SessionBuilder, commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let peer = "192.168.144.64:5000".parse()?;

    let session = Arc::new(SessionBuilder::new().peer(peer).build()?);
    let mut events = session.subscribe();
    session.connect().await?;
    println!("Connected to {} from {:?}", peer, session.local_addr());

    session.send_command(commands::cmd_gimbal_stop).await;

    let deadline = tokio::time::Instant::now() + Duration::from_secs(30);
    let start = tokio::time::Instant::now();

    loop {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        if remaining.is_zero() {
            break;
        }

        match tokio::time::timeout(remaining, events.recv()).await {
            Ok(Ok(event)) => {
                let elapsed = start.elapsed();
                let timestamp = format!("{:>6}.{:03}s", elapsed.as_secs(), elapsed.subsec_millis());

                match event {
                    GimbalEvent::GimbalAttitude(a) => {
                        println!(
                            "{} Attitude      yaw {:>7.2}  pitch {:>7.2}  roll {:>7.2}",
                            timestamp, a.yaw_joint, a.pitch_joint, a.roll_joint
                        );
                    }
                    GimbalEvent::GimbalStatus(s) => {
                        println!(
                            "{} Status        gimbal {} camera {} laser {}",
                            timestamp,
                            if s.gimbal_connected { "ok" } else { "down" },
                            if s.camera_connected { "ok" } else { "down" },
                            if s.laser_ok { "ok" } else { "fault" },
                        );
                    }
                    GimbalEvent::IrStatus(ir) => {
                        println!(
                            "{} IR            max {:.1}C min {:.1}C center {:.1}C",
                            timestamp, ir.max_temp, ir.min_temp, ir.center_temp
                        );
                    }
                    GimbalEvent::LaserRange { meters } => {
                        println!("{} LaserRange    {:.1} m", timestamp, meters);
                    }
                    GimbalEvent::Ack { message_id, code } => {
                        let name = commands::message_name(message_id).unwrap_or("unknown");
                        println!("{} Ack           {} -> {}", timestamp, name, code);
                    }
                    other => println!("{} {:?}", timestamp, other),
                }
            }
            Ok(Err(tokio::sync::broadcast::error::RecvError::Lagged(n))) => {
                println!("(missed {} events due to lag)", n);
            }
            Ok(Err(tokio::sync::broadcast::error::RecvError::Closed)) => {
                println!("Event channel closed.");
                break;
            }
            Err(_) => break,
        }
    }

    session.disconnect().await;
    println!("\nMonitoring complete.");
    Ok(())
}
