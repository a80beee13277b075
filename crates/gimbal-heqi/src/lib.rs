//! gimbal-heqi: HeQi EO/IR gimbal backend.
//!
//! Implements the HeQi binary UDP protocol (revision V1.4.13) spoken by the
//! K40T-MINI four-sensor pod: a fixed-header frame with a 24-bit message id
//! and a 16-bit CRC, a catalog of ~40 command builders, decoders for the
//! periodic telemetry and ACK/status reports, and a [`Session`] that owns
//! the socket and the background receive task.
//!
//! # Layers
//!
//! - [`frame`] -- pure frame encode/decode and the checksum
//! - [`commands`] -- `cmd_*` builders returning ready-to-send frames
//! - [`telemetry`] -- message-id dispatch into [`GimbalEvent`](gimbal_core::GimbalEvent)s
//! - [`session`] -- UDP socket, sequence counter, receive task
//! - [`builder`] -- [`SessionBuilder`] and [`ControlDefaults`]
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use gimbal_heqi::{SessionBuilder, commands};
//! use gimbal_core::{Direction, GimbalMode};
//!
//! # async fn example() -> gimbal_core::Result<()> {
//! let session = Arc::new(SessionBuilder::new().build()?);
//! session.connect().await?;
//!
//! session
//!     .send_command(|seq| {
//!         commands::cmd_gimbal_control(seq, GimbalMode::None, Direction::RIGHT, Direction::Stop)
//!     })
//!     .await;
//! session.send_command(commands::cmd_gimbal_stop).await;
//!
//! session.disconnect().await;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod commands;
pub mod frame;
pub mod session;
pub mod telemetry;

pub use builder::{ControlDefaults, SessionBuilder};
pub use frame::{Frame, crc16, decode_frame, encode_frame};
pub use session::Session;
pub use telemetry::decode_message;
