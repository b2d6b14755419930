//! Configuration schema definitions.
//!
//! One [`ProbeConfig`] is built per invocation and handed by reference to
//! every stage of the probe. Port and path are kept as the raw strings the
//! caller supplied; they only become usable once `validation.rs` accepts them.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

/// Port probed when neither an argument nor `PORT` is given.
pub const DEFAULT_PORT: &str = "9000";

/// Bytes available for the outgoing request.
pub const DEFAULT_REQUEST_CAPACITY: usize = 4096;

/// Bytes available for the response, one of which stays reserved.
pub const DEFAULT_RESPONSE_CAPACITY: usize = 1024;

/// Smallest response buffer that can still hold a status line.
pub const MIN_RESPONSE_CAPACITY: usize = 16;

/// Largest response buffer; the status line never needs more.
pub const MAX_RESPONSE_CAPACITY: usize = 64 * 1024;

/// Root configuration for a single probe.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Address the probe connects to. Always loopback unless built by hand.
    pub host: IpAddr,

    /// Raw port string (argument, `PORT`, or default).
    pub port: String,

    /// Raw path string without the leading slash (argument, `API_PATH`, or empty).
    pub path: String,

    /// Upper bound on connection establishment.
    pub connect_timeout: Duration,

    /// Upper bound on each individual write or read.
    pub io_timeout: Duration,

    /// Response buffer capacity in bytes.
    pub response_capacity: usize,

    /// Request buffer capacity in bytes.
    pub request_capacity: usize,

    /// Emit diagnostics to stdout.
    pub debug: bool,

    /// Print a machine-readable report line after the probe.
    pub json: bool,
}

impl ProbeConfig {
    /// Config for `port`/`path` with every other field at its default.
    pub fn new(port: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            path: path.into(),
            ..Self::default()
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT.to_string(),
            path: String::new(),
            connect_timeout: Duration::from_secs(5),
            io_timeout: Duration::from_secs(5),
            response_capacity: DEFAULT_RESPONSE_CAPACITY,
            request_capacity: DEFAULT_REQUEST_CAPACITY,
            debug: false,
            json: false,
        }
    }
}
