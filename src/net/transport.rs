//! Timeout-bounded TCP connection establishment.
//!
//! # Responsibilities
//! - Create the client socket
//! - Connect to the target within `connect_timeout`
//! - Hand back a [`Connection`] that bounds every later write/read by `io_timeout`
//!
//! # Design Decisions
//! - Socket creation and connect are separate steps so the failure reason
//!   says which one went wrong
//! - All failures are terminal; nothing here retries

use std::fmt;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpSocket;

use crate::config::PortNumber;
use crate::net::connection::Connection;
use crate::resilience::with_deadline;

/// The I/O step a transport failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    Connect,
    Send,
    Receive,
}

impl fmt::Display for IoOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoOperation::Connect => f.write_str("connect"),
            IoOperation::Send => f.write_str("send"),
            IoOperation::Receive => f.write_str("receive"),
        }
    }
}

/// Errors raised while talking to the target over TCP.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The local socket could not be created.
    #[error("could not create endpoint: {0}")]
    Endpoint(#[source] io::Error),

    /// The peer refused or could not be reached.
    #[error("connect to {addr} failed: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// A connect, write or read exceeded its deadline.
    #[error("{operation} timed out after {limit:?}")]
    TimedOut { operation: IoOperation, limit: Duration },

    /// Writing the request failed.
    #[error("send failed: {0}")]
    Send(#[source] io::Error),

    /// Reading the response failed.
    #[error("receive failed: {0}")]
    Receive(#[source] io::Error),

    /// The formatted request does not fit the request buffer.
    #[error("request too long: {len} bytes exceeds the {capacity}-byte request buffer")]
    RequestTooLong { len: usize, capacity: usize },
}

impl TransportError {
    /// True when the failure was an elapsed deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::TimedOut { .. })
    }
}

/// Open a connection to `host:port`.
pub async fn connect(
    host: IpAddr,
    port: PortNumber,
    connect_timeout: Duration,
    io_timeout: Duration,
) -> Result<Connection, TransportError> {
    let addr = SocketAddr::new(host, port.get());

    let socket = match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4(),
        SocketAddr::V6(_) => TcpSocket::new_v6(),
    }
    .map_err(TransportError::Endpoint)?;

    tracing::debug!(%addr, timeout_ms = connect_timeout.as_millis() as u64, "Connecting");

    let stream = with_deadline(connect_timeout, socket.connect(addr))
        .await
        .map_err(|_| TransportError::TimedOut {
            operation: IoOperation::Connect,
            limit: connect_timeout,
        })?
        .map_err(|source| TransportError::Connect { addr, source })?;

    if let Err(e) = stream.set_nodelay(true) {
        tracing::debug!(error = %e, "Failed to set TCP_NODELAY");
    }

    tracing::debug!(%addr, "Connected");
    Ok(Connection::new(stream, addr, io_timeout))
}
