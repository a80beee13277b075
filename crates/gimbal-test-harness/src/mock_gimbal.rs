//! Mock gimbal on a loopback UDP socket.
//!
//! [`MockGimbal`] binds `127.0.0.1:0` and plays the payload's side of the
//! conversation at the datagram level. It does not interpret frames, so
//! tests build and check bytes with the protocol crate's own codec.
//!
//! # Example
//!
//! ```no_run
//! use gimbal_test_harness::MockGimbal;
//! use std::time::Duration;
//!
//! # async fn example() -> gimbal_core::Result<()> {
//! let gimbal = MockGimbal::new().await?;
//!
//! // Point a session at gimbal.addr(), send something, then:
//! let datagram = gimbal.recv(Duration::from_secs(1)).await?;
//!
//! // Reply to whoever sent it.
//! gimbal.send(&[0xFD, 0x00]).await?;
//! # Ok(())
//! # }
//! ```

use std::net::SocketAddr;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use gimbal_core::error::{Error, Result};
use gimbal_transport::UdpTransport;

/// Largest datagram the mock will capture.
const MAX_DATAGRAM: usize = 2048;

/// A fake gimbal endpoint for session tests.
///
/// The source address of the most recent datagram is remembered as the
/// controller, and [`send`](MockGimbal::send) replies there, mirroring how
/// the real payload pushes telemetry back to whoever last commanded it.
pub struct MockGimbal {
    transport: UdpTransport,
    controller: Mutex<Option<SocketAddr>>,
}

impl MockGimbal {
    /// Bind a mock gimbal on a random loopback port.
    pub async fn new() -> Result<Self> {
        let transport = UdpTransport::bind("127.0.0.1:0").await.map_err(|e| {
            Error::Transport(format!("failed to bind mock gimbal: {}", e))
        })?;
        tracing::debug!(addr = %transport.local_addr(), "Mock gimbal listening");
        Ok(Self {
            transport,
            controller: Mutex::new(None),
        })
    }

    /// Address to configure as the session's peer.
    pub fn addr(&self) -> SocketAddr {
        self.transport.local_addr()
    }

    /// Source address of the last datagram received, if any.
    pub fn controller(&self) -> Option<SocketAddr> {
        *self
            .controller
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Wait for the next datagram from the controller.
    ///
    /// Returns [`Error::Timeout`] if nothing arrives within `timeout`.
    pub async fn recv(&self, timeout: Duration) -> Result<Vec<u8>> {
        let mut buf = [0u8; MAX_DATAGRAM];
        let (n, src) = self.transport.recv_from(&mut buf, timeout).await?;
        *self
            .controller
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(src);
        Ok(buf[..n].to_vec())
    }

    /// Collect every datagram that arrives until the line has been quiet
    /// for `quiet`.
    pub async fn recv_all(&self, quiet: Duration) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        while let Ok(datagram) = self.recv(quiet).await {
            out.push(datagram);
        }
        out
    }

    /// Wait for a datagram whose bytes satisfy `matches`, discarding others.
    pub async fn recv_matching<F>(&self, timeout: Duration, matches: F) -> Result<Vec<u8>>
    where
        F: Fn(&[u8]) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return Err(Error::Timeout);
            }
            let datagram = self.recv(remaining).await?;
            if matches(&datagram) {
                return Ok(datagram);
            }
        }
    }

    /// Send a datagram to the controller seen last.
    ///
    /// Returns [`Error::NotConnected`] if nothing has been received yet.
    pub async fn send(&self, datagram: &[u8]) -> Result<()> {
        let controller = self.controller().ok_or(Error::NotConnected)?;
        self.transport.send_to(datagram, controller).await
    }

    /// Send a datagram to an explicit address.
    pub async fn send_to(&self, datagram: &[u8], addr: SocketAddr) -> Result<()> {
        self.transport.send_to(datagram, addr).await
    }
}
