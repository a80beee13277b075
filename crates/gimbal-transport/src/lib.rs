//! Transport layer for the gimbal protocol engine.
//!
//! The payload speaks a datagram protocol, so the only transport is
//! [`UdpTransport`]: a tokio UDP socket with bounded receive timeouts and
//! error mapping into [`gimbal_core::Error`].
//!
//! # Example
//!
//! ```no_run
//! use gimbal_transport::UdpTransport;
//! use std::time::Duration;
//!
//! # async fn example() -> gimbal_core::Result<()> {
//! let transport = UdpTransport::bind("0.0.0.0:0").await?;
//! let peer = "192.168.144.64:5000".parse().unwrap();
//! transport.send_to(&[0xFD, 0x00], peer).await?;
//!
//! let mut buf = [0u8; 1024];
//! let (n, src) = transport.recv_from(&mut buf, Duration::from_secs(5)).await?;
//! println!("{n} bytes from {src}");
//! # Ok(())
//! # }
//! ```

pub mod udp;

pub use udp::UdpTransport;
