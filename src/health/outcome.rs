//! The result of one probe.

use std::fmt;
use std::time::Duration;

use crate::config::ValidationError;
use crate::health::state::ProbeStage;
use crate::http::{ParseError, StatusCode};
use crate::net::TransportError;

/// Exit status for a healthy probe.
pub const EXIT_HEALTHY: u8 = 0;

/// Exit status for every kind of failure.
pub const EXIT_UNHEALTHY: u8 = 1;

/// Exactly one of these is produced per probe.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The service answered with a 2xx status.
    Success(StatusCode),
    /// The service answered, but not with a 2xx status.
    HttpFailure(StatusCode),
    /// Connect, send or receive failed or timed out.
    TransportFailure(TransportError),
    /// Port or path was rejected before any I/O.
    ValidationFailure(ValidationError),
    /// The response did not start with a readable status line.
    ParseFailure(ParseError),
}

impl ProbeOutcome {
    /// Classify a parsed status code.
    pub fn from_status(code: StatusCode) -> Self {
        if code.is_success() {
            ProbeOutcome::Success(code)
        } else {
            ProbeOutcome::HttpFailure(code)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success(_))
    }

    /// The parsed status code, if the probe got that far.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ProbeOutcome::Success(code) | ProbeOutcome::HttpFailure(code) => Some(*code),
            _ => None,
        }
    }

    /// Stable snake_case name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeOutcome::Success(_) => "success",
            ProbeOutcome::HttpFailure(_) => "http_failure",
            ProbeOutcome::TransportFailure(_) => "transport_failure",
            ProbeOutcome::ValidationFailure(_) => "validation_failure",
            ProbeOutcome::ParseFailure(_) => "parse_failure",
        }
    }

    /// Process exit status for this outcome: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            EXIT_HEALTHY
        } else {
            EXIT_UNHEALTHY
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Success(code) => write!(f, "service is available (HTTP {code})"),
            ProbeOutcome::HttpFailure(code) => write!(f, "HTTP error {code}"),
            ProbeOutcome::TransportFailure(e) => write!(f, "{e}"),
            ProbeOutcome::ValidationFailure(e) => write!(f, "{e}"),
            ProbeOutcome::ParseFailure(e) => write!(f, "{e}"),
        }
    }
}

impl From<ValidationError> for ProbeOutcome {
    fn from(e: ValidationError) -> Self {
        ProbeOutcome::ValidationFailure(e)
    }
}

impl From<TransportError> for ProbeOutcome {
    fn from(e: TransportError) -> Self {
        ProbeOutcome::TransportFailure(e)
    }
}

impl From<ParseError> for ProbeOutcome {
    fn from(e: ParseError) -> Self {
        ProbeOutcome::ParseFailure(e)
    }
}

/// Outcome plus where and how long the probe ran.
#[derive(Debug)]
pub struct ProbeReport {
    pub outcome: ProbeOutcome,
    /// Last stage entered before `Done`.
    pub last_stage: ProbeStage,
    pub elapsed: Duration,
}
