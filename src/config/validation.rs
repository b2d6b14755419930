//! Input validation for the probe target.
//!
//! # Responsibilities
//! - Accept only decimal ports in `1..=65535`
//! - Accept only paths that are safe to splice into a request line
//!
//! # Design Decisions
//! - Validation is the only injection defense: the path is concatenated
//!   verbatim after `GET /`, so CR, LF, space, `?`, `#` and `%` are all refused
//! - Validated values are newtypes; the rest of the probe cannot be handed
//!   an unchecked string

use std::fmt;

use thiserror::Error;

use crate::config::schema::ProbeConfig;

/// Maximum accepted path length in bytes.
pub const MAX_PATH_LENGTH: usize = 100;

/// Errors raised while validating the probe target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid port '': port is empty")]
    EmptyPort,

    #[error("invalid port '{0}': only ASCII digits are allowed")]
    NonNumericPort(String),

    #[error("invalid port '{0}': must be between 1 and 65535")]
    PortOutOfRange(String),

    #[error("invalid path '{0}': longer than {max} bytes", max = MAX_PATH_LENGTH)]
    PathTooLong(String),

    #[error("invalid path '{0}': '..' is not allowed")]
    PathTraversal(String),

    #[error("invalid path '{0}': must not start with '/'")]
    AbsolutePath(String),

    #[error("invalid path '{path}': character {found:?} is not allowed")]
    InvalidPathChar { path: String, found: char },
}

/// A port number known to be in `1..=65535`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortNumber(u16);

impl PortNumber {
    pub fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for PortNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A request path (without its leading `/`) that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ProbePath(String);

impl ProbePath {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProbePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated port and path, ready to be probed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub port: PortNumber,
    pub path: ProbePath,
}

/// Validate a decimal port string.
pub fn validate_port(s: &str) -> Result<PortNumber, ValidationError> {
    if s.is_empty() {
        return Err(ValidationError::EmptyPort);
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::NonNumericPort(s.to_string()));
    }

    // Overflowing digit strings are out of range, not a parse failure.
    let value = s
        .bytes()
        .try_fold(0u32, |acc, b| acc.checked_mul(10)?.checked_add(u32::from(b - b'0')));

    match value.and_then(|v| u16::try_from(v).ok()) {
        Some(port) if port > 0 => Ok(PortNumber(port)),
        _ => Err(ValidationError::PortOutOfRange(s.to_string())),
    }
}

/// Validate a request path. The empty path is valid and probes `/`.
pub fn validate_path(s: &str) -> Result<ProbePath, ValidationError> {
    if s.len() > MAX_PATH_LENGTH {
        return Err(ValidationError::PathTooLong(s.to_string()));
    }
    if s.contains("..") {
        return Err(ValidationError::PathTraversal(s.to_string()));
    }
    if s.starts_with('/') {
        return Err(ValidationError::AbsolutePath(s.to_string()));
    }
    if let Some(found) = s.chars().find(|&c| !is_path_char(c)) {
        return Err(ValidationError::InvalidPathChar {
            path: s.to_string(),
            found,
        });
    }
    Ok(ProbePath(s.to_string()))
}

/// Validate both halves of the target. The port is checked first.
pub fn validate_target(config: &ProbeConfig) -> Result<ProbeTarget, ValidationError> {
    Ok(ProbeTarget {
        port: validate_port(&config.port)?,
        path: validate_path(&config.path)?,
    })
}

fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '-')
}
