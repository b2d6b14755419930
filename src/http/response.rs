//! Response accumulation.
//!
//! # Responsibilities
//! - Read the peer's response into a fixed-capacity buffer
//! - Stop at the end of the headers, at capacity, or when the peer closes
//! - Turn stalled or failed reads into a [`TransportError`]
//!
//! # Design Decisions
//! - The buffer never grows; one byte of capacity is always held back
//! - A full buffer or an early close is not an error: the status line comes
//!   first, so whatever was captured still goes to the status parser
//! - The body is never read

use std::io;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::config::schema::MAX_RESPONSE_CAPACITY;
use crate::net::{IoOperation, TransportError};
use crate::resilience::with_deadline;

/// End of the HTTP header block.
pub const HEADER_TERMINATOR: &[u8; 4] = b"\r\n\r\n";

/// A fixed-capacity, append-only byte buffer.
///
/// At most `capacity - 1` bytes are ever filled. The capacity is clamped to
/// `1..=MAX_RESPONSE_CAPACITY`.
#[derive(Debug)]
pub struct ResponseBuffer {
    data: Box<[u8]>,
    filled: usize,
}

impl ResponseBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity.clamp(1, MAX_RESPONSE_CAPACITY)].into_boxed_slice(),
            filled: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Most bytes the buffer will hold.
    pub fn limit(&self) -> usize {
        self.data.len() - 1
    }

    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    pub fn is_full(&self) -> bool {
        self.filled >= self.limit()
    }

    /// Bytes accumulated so far.
    pub fn filled(&self) -> &[u8] {
        &self.data[..self.filled]
    }

    fn unfilled_mut(&mut self) -> &mut [u8] {
        let limit = self.limit();
        &mut self.data[self.filled..limit]
    }

    fn advance(&mut self, n: usize) {
        self.filled = (self.filled + n).min(self.limit());
    }

    /// Whether the terminator appears at or after byte `from`.
    fn has_terminator_from(&self, from: usize) -> bool {
        self.filled()[from..]
            .windows(HEADER_TERMINATOR.len())
            .any(|w| w == HEADER_TERMINATOR)
    }
}

/// Why the reader stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStop {
    /// `\r\n\r\n` was seen.
    HeadersComplete,
    /// The buffer reached its limit first.
    BufferFull,
    /// The peer closed the stream.
    PeerClosed,
}

/// Reads one response into an owned [`ResponseBuffer`].
#[derive(Debug)]
pub struct ResponseReader {
    buffer: ResponseBuffer,
    stop: Option<ReadStop>,
}

impl ResponseReader {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: ResponseBuffer::with_capacity(capacity),
            stop: None,
        }
    }

    /// Why the last read cycle ended, if it ended without an error.
    pub fn stop(&self) -> Option<ReadStop> {
        self.stop
    }

    pub fn buffer(&self) -> &ResponseBuffer {
        &self.buffer
    }

    /// Read from `source` until the header terminator, the buffer limit, or
    /// end of stream. Each individual read is bounded by `io_timeout`.
    pub async fn read_until_terminator_or_limit<R>(
        &mut self,
        source: &mut R,
        io_timeout: Duration,
    ) -> Result<&[u8], TransportError>
    where
        R: AsyncRead + Unpin,
    {
        let stop = loop {
            if self.buffer.is_full() {
                break ReadStop::BufferFull;
            }

            // The terminator may straddle two reads.
            let scan_from = self.buffer.len().saturating_sub(HEADER_TERMINATOR.len() - 1);

            let read = with_deadline(io_timeout, source.read(self.buffer.unfilled_mut()))
                .await
                .map_err(|_| TransportError::TimedOut {
                    operation: IoOperation::Receive,
                    limit: io_timeout,
                })?;

            let n = match read {
                Ok(0) => break ReadStop::PeerClosed,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(TransportError::Receive(e)),
            };

            self.buffer.advance(n);
            tracing::trace!(bytes = n, total = self.buffer.len(), "Response bytes received");

            if self.buffer.has_terminator_from(scan_from) {
                break ReadStop::HeadersComplete;
            }
        };

        tracing::debug!(stop = ?stop, bytes = self.buffer.len(), "Response read finished");
        self.stop = Some(stop);
        Ok(self.buffer.filled())
    }
}
