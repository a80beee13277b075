//! # gimbal -- Control of EO/IR Gimbal Payloads
//!
//! `gimbal` is an asynchronous Rust library for commanding stabilized
//! camera gimbals over their binary UDP control protocol. It builds
//! command frames, sends them to the payload, and decodes the periodic
//! telemetry, acknowledgements and status reports the payload pushes back.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! gimbal = "0.1"
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! Connect and center the gimbal:
//!
//! ```no_run
//! use std::sync::Arc;
//! use gimbal::heqi::{SessionBuilder, commands};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let session = Arc::new(
//!         SessionBuilder::new()
//!             .peer("192.168.144.64:5000".parse()?)
//!             .build()?,
//!     );
//!     session.connect().await?;
//!     session.send_command(commands::cmd_gimbal_center).await;
//!     session.disconnect().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! | Crate                 | Purpose                                          |
//! |-----------------------|--------------------------------------------------|
//! | `gimbal-core`         | Parameter enums, telemetry records, events, errors |
//! | `gimbal-transport`    | Tokio UDP transport with timeouts               |
//! | `gimbal-heqi`         | HeQi frame codec, commands, telemetry, session  |
//! | **`gimbal`**          | This facade crate -- re-exports everything      |
//!
//! ## Events
//!
//! Decoded traffic reaches the application two ways. A
//! [`TelemetrySink`] installed on the builder is called synchronously on
//! the receive task, and any number of broadcast receivers from
//! [`Session::subscribe`](heqi::Session::subscribe) get a copy of every
//! [`GimbalEvent`]:
//!
//! ```no_run
//! use gimbal::GimbalEvent;
//! # async fn example(session: &gimbal::heqi::Session) {
//! let mut events = session.subscribe();
//! while let Ok(event) = events.recv().await {
//!     if let GimbalEvent::GimbalAttitude(att) = event {
//!         println!("yaw {:.2} pitch {:.2}", att.yaw_joint, att.pitch_joint);
//!     }
//! }
//! # }
//! ```
//!
//! ## Supported payloads
//!
//! - **HeQi**: K40T-MINI and other payloads speaking protocol V1.4.x

pub use gimbal_core::*;

/// UDP transport.
pub mod transport {
    pub use gimbal_transport::*;
}

/// HeQi binary UDP protocol backend.
///
/// Provides [`Session`](heqi::Session) and
/// [`SessionBuilder`](heqi::SessionBuilder), the `cmd_*` constructors in
/// [`commands`](heqi::commands), and the frame codec.
pub mod heqi {
    pub use gimbal_heqi::*;
}
