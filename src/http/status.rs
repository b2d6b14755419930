//! Status-line parsing.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Shortest acceptable response, `HTTP/1.1 200`.
pub const MIN_RESPONSE_LEN: usize = 12;

/// Bytes of an unparseable response kept for diagnostics.
pub const SNIPPET_LEN: usize = 100;

/// Errors raised while extracting the status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("insufficient data: received {received} bytes, need at least {min}", min = MIN_RESPONSE_LEN)]
    InsufficientData { received: usize },

    #[error("could not parse HTTP response: {snippet}...")]
    Malformed { snippet: String },
}

/// A numeric HTTP status code. The value is not range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StatusCode(u32);

impl StatusCode {
    pub fn new(code: u32) -> Self {
        Self(code)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// 2xx.
    pub fn is_success(self) -> bool {
        (200..300).contains(&self.0)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extract the status code from the start of an HTTP/1.x response.
///
/// The first whitespace-separated token must start with `HTTP/` and the
/// second must be all ASCII digits.
pub fn parse_status(bytes: &[u8]) -> Result<StatusCode, ParseError> {
    if bytes.len() < MIN_RESPONSE_LEN {
        return Err(ParseError::InsufficientData {
            received: bytes.len(),
        });
    }

    let mut tokens = bytes
        .split(|b| b.is_ascii_whitespace())
        .filter(|token| !token.is_empty());

    let version = tokens.next().unwrap_or_default();
    if !version.starts_with(b"HTTP/") {
        return Err(malformed(bytes));
    }

    tokens
        .next()
        .and_then(parse_decimal)
        .map(StatusCode)
        .ok_or_else(|| malformed(bytes))
}

fn parse_decimal(token: &[u8]) -> Option<u32> {
    if !token.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(token).ok()?.parse().ok()
}

fn malformed(bytes: &[u8]) -> ParseError {
    let end = bytes.len().min(SNIPPET_LEN);
    ParseError::Malformed {
        snippet: String::from_utf8_lossy(&bytes[..end]).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_status_lines() {
        assert_eq!(parse_status(b"HTTP/1.1 200 OK\r\n\r\n").unwrap().as_u32(), 200);
        assert_eq!(parse_status(b"HTTP/1.0 503 Service Unavailable\r\n").unwrap().as_u32(), 503);
        assert_eq!(parse_status(b"HTTP/2 204 No Content\r\n\r\n").unwrap().as_u32(), 204);
        assert_eq!(parse_status(b"HTTP/1.1 200").unwrap().as_u32(), 200);
    }

    #[test]
    fn tolerates_extra_whitespace_between_tokens() {
        assert_eq!(parse_status(b"HTTP/1.1   404\tNot Found").unwrap().as_u32(), 404);
    }

    #[test]
    fn out_of_range_codes_still_parse() {
        assert_eq!(parse_status(b"HTTP/1.1 999 Weird\r\n").unwrap().as_u32(), 999);
        assert_eq!(parse_status(b"HTTP/1.1 042 Odd\r\n").unwrap().as_u32(), 42);
    }

    #[test]
    fn short_input_is_insufficient() {
        assert_eq!(
            parse_status(b"HTTP/1.1 20"),
            Err(ParseError::InsufficientData { received: 11 })
        );
        assert_eq!(
            parse_status(b""),
            Err(ParseError::InsufficientData { received: 0 })
        );
    }

    #[test]
    fn rejects_malformed_lines() {
        for bad in [
            &b"SSH-2.0-OpenSSH_9.6\r\n"[..],
            b"http/1.1 200 OK\r\n\r\n",
            b"HTTP/1.1 OK 200\r\n\r\n",
            b"HTTP/1.1 -200 OK\r\n\r\n",
            b"HTTP/1.1 2x0 OK\r\n\r\n",
            b"HTTP/1.1\r\n\r\n\r\n",
            b"HTTP/1.1 99999999999 OK",
        ] {
            assert!(
                matches!(parse_status(bad), Err(ParseError::Malformed { .. })),
                "{:?} should be malformed",
                String::from_utf8_lossy(bad)
            );
        }
    }

    #[test]
    fn snippet_is_bounded() {
        let garbage = vec![b'x'; 4096];
        match parse_status(&garbage) {
            Err(ParseError::Malformed { snippet }) => assert_eq!(snippet.len(), SNIPPET_LEN),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn classifies_2xx() {
        assert!(StatusCode::new(200).is_success());
        assert!(StatusCode::new(299).is_success());
        assert!(!StatusCode::new(199).is_success());
        assert!(!StatusCode::new(300).is_success());
    }
}
