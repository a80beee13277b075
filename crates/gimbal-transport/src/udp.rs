//! UDP transport for gimbal communication.
//!
//! The payload listens for commands on a fixed port and pushes telemetry
//! back to whatever address the controller sent from. A single unconnected
//! socket therefore serves both directions: commands go out with
//! [`UdpTransport::send_to`] to the current peer, and telemetry comes in on
//! the same local port through [`UdpTransport::recv_from`].
//!
//! The socket is shared as `Arc<UdpTransport>` between the receive task and
//! any number of senders; every method takes `&self`.

use gimbal_core::error::{Error, Result};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;

/// UDP transport for datagram-based gimbal control.
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
    local_addr: SocketAddr,
}

impl UdpTransport {
    /// Bind to a local `host:port` string.
    ///
    /// Use `"0.0.0.0:0"` to let the OS choose a port on all interfaces.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use gimbal_transport::UdpTransport;
    /// # async fn example() -> gimbal_core::Result<()> {
    /// let transport = UdpTransport::bind("0.0.0.0:0").await?;
    /// println!("Bound to {}", transport.local_addr());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn bind(addr: &str) -> Result<Self> {
        tracing::debug!(addr = %addr, "Binding UDP socket");

        let socket = UdpSocket::bind(addr).await.map_err(|e| {
            tracing::error!(addr = %addr, error = %e, "Failed to bind UDP socket");
            Error::Io(e)
        })?;

        Self::from_socket(socket)
    }

    /// Bind to an already-resolved socket address.
    pub async fn bind_addr(addr: SocketAddr) -> Result<Self> {
        tracing::debug!(addr = %addr, "Binding UDP socket");

        let socket = UdpSocket::bind(addr).await.map_err(|e| {
            tracing::error!(addr = %addr, error = %e, "Failed to bind UDP socket");
            Error::Io(e)
        })?;

        Self::from_socket(socket)
    }

    fn from_socket(socket: UdpSocket) -> Result<Self> {
        let local_addr = socket.local_addr().map_err(|e| {
            tracing::error!(error = %e, "Failed to get local address");
            Error::Io(e)
        })?;

        tracing::debug!(local_addr = %local_addr, "UDP socket bound");

        Ok(Self { socket, local_addr })
    }

    /// The local address this socket is bound to.
    ///
    /// When bound to port 0 this reports the port the OS assigned.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Send `data` as one datagram to `addr`.
    ///
    /// UDP gives no delivery guarantee; success only means the datagram
    /// was handed to the OS.
    pub async fn send_to(&self, data: &[u8], addr: SocketAddr) -> Result<()> {
        tracing::trace!(
            local = %self.local_addr,
            remote = %addr,
            bytes = data.len(),
            "Sending datagram"
        );

        let sent = self.socket.send_to(data, addr).await.map_err(|e| {
            tracing::error!(
                local = %self.local_addr,
                remote = %addr,
                error = %e,
                "Failed to send datagram"
            );
            Error::Io(e)
        })?;

        if sent != data.len() {
            return Err(Error::Transport(format!(
                "short datagram write: {sent} of {} bytes",
                data.len()
            )));
        }

        Ok(())
    }

    /// Receive one datagram, waiting at most `timeout`.
    ///
    /// Returns `(bytes_read, source_addr)`. Bytes beyond `buf.len()` are
    /// discarded by the OS.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] if nothing arrives within `timeout`, and
    /// [`Error::Io`] for socket errors (e.g. ICMP port unreachable reported
    /// on some platforms after a send to a closed peer).
    pub async fn recv_from(
        &self,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<(usize, SocketAddr)> {
        match tokio::time::timeout(timeout, self.socket.recv_from(buf)).await {
            Ok(Ok((n, src))) => {
                tracing::trace!(
                    local = %self.local_addr,
                    remote = %src,
                    bytes = n,
                    "Received datagram"
                );
                Ok((n, src))
            }
            Ok(Err(e)) => {
                tracing::debug!(
                    local = %self.local_addr,
                    error = %e,
                    "Failed to receive datagram"
                );
                Err(Error::Io(e))
            }
            Err(_) => Err(Error::Timeout),
        }
    }

    /// Receive one datagram, ignoring the source address.
    pub async fn recv(&self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        let (n, _src) = self.recv_from(buf, timeout).await?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_and_local_addr() {
        let transport = UdpTransport::bind("127.0.0.1:0").await.unwrap();
        let addr = transport.local_addr();

        assert_eq!(addr.ip(), std::net::Ipv4Addr::LOCALHOST);
        assert_ne!(addr.port(), 0, "OS should assign a nonzero port");
    }

    #[tokio::test]
    async fn bind_addr_resolved() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let transport = UdpTransport::bind_addr(addr).await.unwrap();
        assert_ne!(transport.local_addr().port(), 0);
    }

    #[tokio::test]
    async fn bind_invalid_address_fails() {
        let result = UdpTransport::bind("not-an-address").await;
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn send_recv_loopback() {
        let controller = UdpTransport::bind("127.0.0.1:0").await.unwrap();
        let gimbal = UdpTransport::bind("127.0.0.1:0").await.unwrap();

        let frame = [0xFD, 0x04, 0x04, 0x01, 0x07, 0x01, 0x01, 0x10, 0x00, 0x00];
        controller.send_to(&frame, gimbal.local_addr()).await.unwrap();

        let mut buf = [0u8; 64];
        let (n, src) = gimbal
            .recv_from(&mut buf, Duration::from_secs(2))
            .await
            .unwrap();

        assert_eq!(&buf[..n], &frame);
        assert_eq!(src, controller.local_addr());
    }

    #[tokio::test]
    async fn recv_timeout() {
        let transport = UdpTransport::bind("127.0.0.1:0").await.unwrap();

        let mut buf = [0u8; 64];
        let result = transport.recv(&mut buf, Duration::from_millis(50)).await;

        assert!(
            matches!(result, Err(Error::Timeout)),
            "expected Timeout, got: {:?}",
            result
        );
    }

    #[tokio::test]
    async fn shared_between_tasks() {
        let gimbal = UdpTransport::bind("127.0.0.1:0").await.unwrap();
        let dest = gimbal.local_addr();
        let controller = std::sync::Arc::new(UdpTransport::bind("127.0.0.1:0").await.unwrap());

        let mut handles = Vec::new();
        for i in 0..4u8 {
            let c = controller.clone();
            handles.push(tokio::spawn(async move { c.send_to(&[i], dest).await }));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }

        let mut seen = Vec::new();
        let mut buf = [0u8; 8];
        for _ in 0..4 {
            let n = gimbal.recv(&mut buf, Duration::from_secs(2)).await.unwrap();
            assert_eq!(n, 1);
            seen.push(buf[0]);
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }
}
