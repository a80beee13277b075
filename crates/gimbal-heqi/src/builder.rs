//! SessionBuilder -- fluent builder for constructing [`Session`] instances.
//!
//! Separates configuration from construction so that callers can set the
//! gimbal address, local bind address, receive timeout, and event sink
//! before any socket is opened. Building never touches the network; the
//! socket is bound by [`Session::connect`].
//!
//! # Example
//!
//! ```no_run
//! use gimbal_heqi::builder::SessionBuilder;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> gimbal_core::Result<()> {
//! let session = Arc::new(
//!     SessionBuilder::new()
//!         .peer("192.168.144.64:5000".parse().unwrap())
//!         .receive_timeout(Duration::from_secs(2))
//!         .build()?,
//! );
//! session.connect().await?;
//! # Ok(())
//! # }
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use gimbal_core::error::{Error, Result};
use gimbal_core::events::{NullSink, TelemetrySink};

use crate::session::Session;

/// Factory settings of the K40T-MINI payload and its ground application.
pub struct ControlDefaults;

impl ControlDefaults {
    /// Control address of the payload on its default subnet.
    pub const PEER_IP: Ipv4Addr = Ipv4Addr::new(192, 168, 144, 64);
    /// UDP port the payload listens on for commands.
    pub const PEER_PORT: u16 = 5000;
    /// Rocker speed used for both axes until the operator changes it.
    pub const SPEED: u8 = 50;
    /// How long the receive loop waits before rechecking for cancellation.
    pub const RECEIVE_TIMEOUT: Duration = Duration::from_secs(5);
    /// Resend period for held direction controls.
    pub const CONTROL_REPEAT_INTERVAL: Duration = Duration::from_millis(100);
    /// Broadcast channel capacity for session events.
    pub const EVENT_CAPACITY: usize = 256;

    /// Default peer endpoint.
    pub fn peer() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Self::PEER_IP), Self::PEER_PORT)
    }

    /// Default local bind address: all interfaces, OS-chosen port.
    pub fn bind_addr() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0)
    }
}

/// Fluent builder for [`Session`].
///
/// Every setting has a default from [`ControlDefaults`], so the simplest
/// usage is `SessionBuilder::new().build()?`.
pub struct SessionBuilder {
    peer: SocketAddr,
    bind_addr: SocketAddr,
    receive_timeout: Duration,
    event_capacity: usize,
    sink: Arc<dyn TelemetrySink>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        SessionBuilder {
            peer: ControlDefaults::peer(),
            bind_addr: ControlDefaults::bind_addr(),
            receive_timeout: ControlDefaults::RECEIVE_TIMEOUT,
            event_capacity: ControlDefaults::EVENT_CAPACITY,
            sink: Arc::new(NullSink),
        }
    }

    /// Set the gimbal's control endpoint.
    pub fn peer(mut self, addr: SocketAddr) -> Self {
        self.peer = addr;
        self
    }

    /// Set only the gimbal's IP address, keeping the configured port.
    pub fn peer_ip(mut self, ip: IpAddr) -> Self {
        self.peer.set_ip(ip);
        self
    }

    /// Set only the gimbal's control port, keeping the configured IP.
    pub fn peer_port(mut self, port: u16) -> Self {
        self.peer.set_port(port);
        self
    }

    /// Set the local address telemetry is received on (default `0.0.0.0:0`).
    pub fn bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set how long one receive call may block (default 5 s).
    ///
    /// This bounds how stale the loop's view of its cancellation token can
    /// get if the runtime cannot interrupt the read.
    pub fn receive_timeout(mut self, timeout: Duration) -> Self {
        self.receive_timeout = timeout;
        self
    }

    /// Set the broadcast channel capacity (default 256).
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Install a synchronous event sink.
    pub fn sink(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.sink = sink;
        self
    }

    /// Validate the configuration and create a disconnected [`Session`].
    pub fn build(self) -> Result<Session> {
        if self.receive_timeout.is_zero() {
            return Err(Error::InvalidParameter(
                "receive timeout must be non-zero".into(),
            ));
        }
        if self.event_capacity == 0 {
            return Err(Error::InvalidParameter(
                "event capacity must be at least 1".into(),
            ));
        }
        if self.peer.port() == 0 {
            return Err(Error::InvalidParameter("peer port must be non-zero".into()));
        }

        tracing::debug!(
            peer = %self.peer,
            bind = %self.bind_addr,
            receive_timeout_ms = self.receive_timeout.as_millis(),
            "Session configured"
        );

        Ok(Session::new(
            self.peer,
            self.bind_addr,
            self.receive_timeout,
            self.event_capacity,
            self.sink,
        ))
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
