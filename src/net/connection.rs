//! Connection ownership and release.
//!
//! # Responsibilities
//! - Own the TCP stream for the single probe
//! - Apply the I/O deadline to every write
//! - Release the socket exactly once, on whatever path the probe exits by

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::net::transport::{IoOperation, TransportError};
use crate::resilience::with_deadline;

/// An open connection to the probe target.
///
/// Dropping it closes the socket.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    io_timeout: Duration,
}

impl Connection {
    pub(crate) fn new(stream: TcpStream, peer: SocketAddr, io_timeout: Duration) -> Self {
        Self {
            stream,
            peer,
            io_timeout,
        }
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Deadline applied to each individual write or read.
    pub fn io_timeout(&self) -> Duration {
        self.io_timeout
    }

    /// Write all of `bytes`, failing if the write stalls past the I/O deadline.
    pub async fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        with_deadline(self.io_timeout, self.stream.write_all(bytes))
            .await
            .map_err(|_| TransportError::TimedOut {
                operation: IoOperation::Send,
                limit: self.io_timeout,
            })?
            .map_err(TransportError::Send)?;

        tracing::trace!(peer = %self.peer, bytes = bytes.len(), "Request sent");
        Ok(())
    }

    /// Read side of the stream, for the response reader.
    pub fn stream_mut(&mut self) -> &mut TcpStream {
        &mut self.stream
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        tracing::debug!(peer = %self.peer, "Connection closed");
    }
}
