//! UDP session with the gimbal.
//!
//! A [`Session`] owns one UDP socket, the rolling sequence counter, and a
//! single background receive task. Commands are fire-and-forget: any task
//! may call [`Session::send`] or [`Session::send_command`] at any time,
//! including while the receive task is blocked in a read, because the
//! socket is shared as `Arc<UdpTransport>`.
//!
//! Decoded inbound traffic is delivered twice: synchronously to the
//! configured [`TelemetrySink`] on the receive task, then on a broadcast
//! channel obtained from [`Session::subscribe`].

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use gimbal_core::error::{Error, Result};
use gimbal_core::events::{GimbalEvent, TelemetrySink};
use gimbal_transport::UdpTransport;

use crate::commands::message_name;
use crate::frame::decode_frame;
use crate::telemetry::decode_message;

/// Receive buffer size. The largest frame is 267 bytes.
const RECV_BUF_LEN: usize = 1024;

/// Pause after a failed receive before reading again.
const RECV_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Handle to the running receive task.
struct ReceiveTask {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// A control session with one gimbal.
///
/// Create with [`SessionBuilder`](crate::builder::SessionBuilder) and share
/// as `Arc<Session>`.
pub struct Session {
    /// Where commands are sent. Changeable while connected.
    peer: RwLock<SocketAddr>,
    bind_addr: SocketAddr,
    receive_timeout: Duration,

    sequence: AtomicU8,

    /// Socket slot read by senders. `Some` exactly while connected.
    transport: RwLock<Option<Arc<UdpTransport>>>,

    /// Connection state flag (atomic for lock-free reads).
    connected: AtomicBool,

    /// Serializes connect/disconnect and holds the receive task.
    receiver: Mutex<Option<ReceiveTask>>,

    sink: Arc<dyn TelemetrySink>,
    event_tx: broadcast::Sender<GimbalEvent>,
}

impl Session {
    pub(crate) fn new(
        peer: SocketAddr,
        bind_addr: SocketAddr,
        receive_timeout: Duration,
        event_capacity: usize,
        sink: Arc<dyn TelemetrySink>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(event_capacity);
        Session {
            peer: RwLock::new(peer),
            bind_addr,
            receive_timeout,
            sequence: AtomicU8::new(0),
            transport: RwLock::new(None),
            connected: AtomicBool::new(false),
            receiver: Mutex::new(None),
            sink,
            event_tx,
        }
    }

    // ---------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------

    /// Bind the socket and start the receive task.
    ///
    /// Returns `Ok(())` without doing anything if already connected.
    pub async fn connect(&self) -> Result<()> {
        let mut receiver = self.receiver.lock().await;
        if receiver.is_some() {
            debug!("Session already connected");
            return Ok(());
        }

        let transport = Arc::new(UdpTransport::bind_addr(self.bind_addr).await?);
        let local = transport.local_addr();

        *self.transport.write().unwrap_or_else(PoisonError::into_inner) =
            Some(Arc::clone(&transport));
        self.connected.store(true, Ordering::SeqCst);
        self.emit(GimbalEvent::Connected);

        let cancel = CancellationToken::new();
        let task = tokio::spawn(receive_loop(
            transport,
            self.receive_timeout,
            Arc::clone(&self.sink),
            self.event_tx.clone(),
            cancel.clone(),
        ));
        *receiver = Some(ReceiveTask { cancel, task });

        debug!(local = %local, peer = %self.peer(), "Session connected");
        Ok(())
    }

    /// Stop the receive task and close the socket.
    ///
    /// Waits for the task to finish, so no sink callback runs after this
    /// returns. Calling it while disconnected does nothing.
    pub async fn disconnect(&self) {
        let mut receiver = self.receiver.lock().await;
        let Some(running) = receiver.take() else {
            return;
        };

        self.connected.store(false, Ordering::SeqCst);
        running.cancel.cancel();
        if let Err(e) = running.task.await {
            warn!(error = %e, "Receive task ended abnormally");
        }

        *self.transport.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.emit(GimbalEvent::Disconnected);
        debug!("Session disconnected");
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Local address of the socket while connected.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.current_transport().map(|t| t.local_addr())
    }

    // ---------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------

    /// The gimbal endpoint commands are sent to.
    pub fn peer(&self) -> SocketAddr {
        *self.peer.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Change the gimbal endpoint. The next send uses it; no reconnect is
    /// needed.
    pub fn set_peer(&self, addr: SocketAddr) {
        let mut peer = self.peer.write().unwrap_or_else(PoisonError::into_inner);
        let old = *peer;
        if old != addr {
            debug!(old = %old, new = %addr, "Peer changed");
            *peer = addr;
        }
    }

    // ---------------------------------------------------------------
    // Sending
    // ---------------------------------------------------------------

    /// Next sequence number: 1 on the first call, wrapping 255 -> 0.
    pub fn next_sequence(&self) -> u8 {
        self.sequence.fetch_add(1, Ordering::SeqCst).wrapping_add(1)
    }

    /// Send a frame to the peer, reporting failures to the caller.
    pub async fn try_send(&self, frame: &[u8]) -> Result<()> {
        let transport = self.current_transport().ok_or(Error::NotConnected)?;
        transport.send_to(frame, self.peer()).await
    }

    /// Send a frame to the peer. Failures are logged and otherwise ignored.
    pub async fn send(&self, frame: &[u8]) {
        if let Err(e) = self.try_send(frame).await {
            warn!(error = %e, bytes = frame.len(), "Dropping outbound frame");
        }
    }

    /// Allocate a sequence number, build a frame with it, and send it.
    ///
    /// Returns the sequence number used.
    ///
    /// ```no_run
    /// # use gimbal_heqi::{Session, commands::cmd_gimbal_center};
    /// # async fn example(session: &Session) {
    /// let seq = session.send_command(cmd_gimbal_center).await;
    /// # }
    /// ```
    pub async fn send_command<F>(&self, build: F) -> u8
    where
        F: FnOnce(u8) -> Vec<u8>,
    {
        let seq = self.next_sequence();
        let frame = build(seq);
        trace!(seq, bytes = frame.len(), "Sending command");
        self.send(&frame).await;
        seq
    }

    // ---------------------------------------------------------------
    // Events
    // ---------------------------------------------------------------

    /// Subscribe to session events. Each receiver sees every event sent
    /// after it subscribed.
    pub fn subscribe(&self) -> broadcast::Receiver<GimbalEvent> {
        self.event_tx.subscribe()
    }

    fn emit(&self, event: GimbalEvent) {
        self.sink.dispatch(&event);
        let _ = self.event_tx.send(event);
    }

    fn current_transport(&self) -> Option<Arc<UdpTransport>> {
        self.transport
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(running) = self.receiver.get_mut().take() {
            running.cancel.cancel();
            running.task.abort();
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("peer", &self.peer())
            .field("bind_addr", &self.bind_addr)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------
// Receive loop
// ---------------------------------------------------------------

/// Read datagrams until cancelled.
///
/// Cancellation is checked first on every iteration; the receive timeout
/// keeps each read bounded.
async fn receive_loop(
    transport: Arc<UdpTransport>,
    receive_timeout: Duration,
    sink: Arc<dyn TelemetrySink>,
    event_tx: broadcast::Sender<GimbalEvent>,
    cancel: CancellationToken,
) {
    let mut buf = [0u8; RECV_BUF_LEN];

    loop {
        let result = tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                debug!("Receive loop cancelled");
                break;
            }

            result = transport.recv_from(&mut buf, receive_timeout) => result,
        };

        match result {
            Ok((n, src)) => handle_datagram(&buf[..n], src, &*sink, &event_tx),
            Err(Error::Timeout) => {}
            Err(e) => {
                if cancel.is_cancelled() {
                    break;
                }
                warn!(error = %e, "Receive failed");
                if !backoff(&cancel, RECV_ERROR_BACKOFF).await {
                    debug!("Receive loop cancelled");
                    break;
                }
            }
        }
    }
}

/// Sleep for `delay` unless cancelled first. Returns `false` on cancellation.
async fn backoff(cancel: &CancellationToken, delay: Duration) -> bool {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}

fn handle_datagram(
    data: &[u8],
    src: SocketAddr,
    sink: &dyn TelemetrySink,
    event_tx: &broadcast::Sender<GimbalEvent>,
) {
    let Some(frame) = decode_frame(data) else {
        trace!(src = %src, bytes = data.len(), "Dropping malformed datagram");
        return;
    };

    let Some(event) = decode_message(frame.message_id, &frame.payload) else {
        trace!(
            src = %src,
            message_id = format!("{:06X}", frame.message_id),
            name = message_name(frame.message_id).unwrap_or("unknown"),
            "Ignoring message"
        );
        return;
    };

    if let GimbalEvent::Ack { message_id, code } = &event {
        let name = message_name(*message_id).unwrap_or("unknown");
        if code.is_ok() {
            debug!(message_id = format!("{:06X}", message_id), name, "ACK");
        } else {
            warn!(
                message_id = format!("{:06X}", message_id),
                name,
                code = %code,
                "Negative ACK"
            );
        }
    }

    sink.dispatch(&event);
    let _ = event_tx.send(event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SessionBuilder;
    use crate::commands::cmd_gimbal_stop;

    fn session() -> Session {
        SessionBuilder::new()
            .bind_addr("127.0.0.1:0".parse().unwrap())
            .peer("127.0.0.1:9".parse().unwrap())
            .receive_timeout(Duration::from_millis(50))
            .build()
            .unwrap()
    }

    #[test]
    fn sequence_starts_at_one_and_wraps() {
        let s = session();
        let seqs: Vec<u8> = (0..256).map(|_| s.next_sequence()).collect();
        assert_eq!(seqs[0], 1);
        assert_eq!(seqs[254], 255);
        assert_eq!(seqs[255], 0);
        assert_eq!(s.next_sequence(), 1);
    }

    #[test]
    fn set_peer_updates() {
        let s = session();
        let addr: SocketAddr = "10.1.2.3:5000".parse().unwrap();
        s.set_peer(addr);
        assert_eq!(s.peer(), addr);
    }

    #[tokio::test]
    async fn try_send_while_disconnected() {
        let s = session();
        let result = s.try_send(&cmd_gimbal_stop(1)).await;
        assert!(matches!(result, Err(Error::NotConnected)));
    }

    #[tokio::test]
    async fn send_command_while_disconnected_consumes_sequence() {
        let s = session();
        assert_eq!(s.send_command(cmd_gimbal_stop).await, 1);
        assert_eq!(s.send_command(cmd_gimbal_stop).await, 2);
    }

    #[tokio::test]
    async fn connect_and_disconnect_events() {
        let s = session();
        let mut rx = s.subscribe();

        s.connect().await.unwrap();
        assert!(s.is_connected());
        assert!(s.local_addr().is_some());

        s.disconnect().await;
        assert!(!s.is_connected());
        assert_eq!(s.local_addr(), None);

        assert_eq!(rx.recv().await.unwrap(), GimbalEvent::Connected);
        assert_eq!(rx.recv().await.unwrap(), GimbalEvent::Disconnected);
    }

    #[tokio::test]
    async fn disconnect_twice_is_harmless() {
        let s = session();
        s.connect().await.unwrap();
        s.disconnect().await;
        s.disconnect().await;
        assert!(!s.is_connected());
    }

    #[tokio::test]
    async fn backoff_waits_then_continues() {
        let cancel = CancellationToken::new();
        let start = std::time::Instant::now();
        assert!(backoff(&cancel, Duration::from_millis(40)).await);
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn backoff_stops_on_cancel() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let start = std::time::Instant::now();
        assert!(!backoff(&cancel, Duration::from_secs(10)).await);
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn bind_failure_is_reported() {
        let holder = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
        let taken = holder.local_addr().unwrap();
        let s = SessionBuilder::new().bind_addr(taken).build().unwrap();

        assert!(s.connect().await.is_err());
        assert!(!s.is_connected());
    }
}
