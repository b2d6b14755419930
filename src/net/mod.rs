//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Validated port
//!     → transport.rs (socket creation, bounded connect)
//!     → connection.rs (owned stream, bounded writes, closed on drop)
//!     → Hand off to the HTTP layer
//! ```
//!
//! # Design Decisions
//! - The target host is loopback; nothing resolves names
//! - One connection per process, never reused
//! - Each failure reason stays distinct for diagnostics even though the
//!   probe treats them all the same

pub mod connection;
pub mod transport;

pub use connection::Connection;
pub use transport::{connect, IoOperation, TransportError};
