//! Request construction.
//!
//! # Responsibilities
//! - Format the single GET request the probe sends
//! - Refuse to produce a request larger than the request buffer
//!
//! # Design Decisions
//! - `Connection: close` is always sent so the peer ends the stream after one
//!   response; the reader relies on that instead of parsing Content-Length
//! - The path is spliced in verbatim; only a validated [`ProbePath`] is accepted

use crate::config::{PortNumber, ProbePath};
use crate::net::TransportError;

/// Build `GET /{path} HTTP/1.1` with `Host` and `Connection: close` headers.
pub fn build_request(
    path: &ProbePath,
    port: PortNumber,
    capacity: usize,
) -> Result<String, TransportError> {
    let request = format!(
        "GET /{path} HTTP/1.1\r\nHost: localhost:{port}\r\nConnection: close\r\n\r\n"
    );

    if request.len() > capacity {
        return Err(TransportError::RequestTooLong {
            len: request.len(),
            capacity,
        });
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{validate_path, validate_port};
    use crate::config::schema::DEFAULT_REQUEST_CAPACITY;

    #[test]
    fn formats_exact_request() {
        let path = validate_path("actuator/health").unwrap();
        let port = validate_port("8080").unwrap();
        let request = build_request(&path, port, DEFAULT_REQUEST_CAPACITY).unwrap();
        assert_eq!(
            request,
            "GET /actuator/health HTTP/1.1\r\nHost: localhost:8080\r\nConnection: close\r\n\r\n"
        );
    }

    #[test]
    fn empty_path_requests_root() {
        let path = validate_path("").unwrap();
        let port = validate_port("9000").unwrap();
        let request = build_request(&path, port, DEFAULT_REQUEST_CAPACITY).unwrap();
        assert!(request.starts_with("GET / HTTP/1.1\r\n"));
        assert!(request.contains("Host: localhost:9000"));
        assert!(request.contains("Connection: close"));
    }

    #[test]
    fn request_over_capacity_is_refused() {
        let path = validate_path(&"a".repeat(100)).unwrap();
        let port = validate_port("65535").unwrap();
        let request = build_request(&path, port, DEFAULT_REQUEST_CAPACITY).unwrap();

        let err = build_request(&path, port, request.len() - 1).unwrap_err();
        assert!(matches!(
            err,
            TransportError::RequestTooLong { len, capacity } if len == request.len() && capacity == len - 1
        ));
        assert!(build_request(&path, port, request.len()).is_ok());
    }
}
