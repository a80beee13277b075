//! Error types for the gimbal protocol engine.
//!
//! Fallible operations return [`Result<T>`] with [`Error`] as the error
//! type. Only the transport layer actually fails: malformed wire data is
//! dropped by the decoder and out-of-range command parameters are clamped,
//! so neither surfaces here.

/// The error type for gimbal engine operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A transport-level error (socket bind, send, address resolution).
    #[error("transport error: {0}")]
    Transport(String),

    /// Timed out waiting for a datagram.
    ///
    /// The receive loop treats this as a normal idle tick, not a failure.
    #[error("timeout waiting for datagram")]
    Timeout,

    /// The session has no open socket.
    #[error("not connected")]
    NotConnected,

    /// An invalid parameter was passed to a configuration call.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_transport() {
        let e = Error::Transport("bind failed".into());
        assert_eq!(e.to_string(), "transport error: bind failed");
    }

    #[test]
    fn error_display_timeout() {
        assert_eq!(Error::Timeout.to_string(), "timeout waiting for datagram");
    }

    #[test]
    fn error_display_not_connected() {
        assert_eq!(Error::NotConnected.to_string(), "not connected");
    }

    #[test]
    fn error_display_invalid_parameter() {
        let e = Error::InvalidParameter("peer address".into());
        assert_eq!(e.to_string(), "invalid parameter: peer address");
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
        assert!(e.to_string().contains("address in use"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<Error>();
    }
}
