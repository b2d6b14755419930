//! Terminal-outcome diagnostics.
//!
//! The probe reports once, after it reaches `Done`. Every failure path goes
//! through [`report`]; nothing else in the crate decides whether to print.

use serde::Serialize;

use crate::config::ProbeConfig;
use crate::health::{ProbeOutcome, ProbeReport, ProbeStage};
use crate::http::StatusCode;

/// Human-readable one-line summary of an outcome.
pub fn message(outcome: &ProbeOutcome) -> String {
    match outcome {
        ProbeOutcome::Success(_) => format!("Success: {outcome}"),
        ProbeOutcome::HttpFailure(_) => format!("Failure: {outcome}"),
        ProbeOutcome::TransportFailure(_)
        | ProbeOutcome::ValidationFailure(_)
        | ProbeOutcome::ParseFailure(_) => format!("Error: {outcome}"),
    }
}

/// Emit the terminal outcome as a single log event.
pub fn report(report: &ProbeReport) {
    let elapsed_ms = report.elapsed.as_millis() as u64;
    let stage = report.last_stage.as_str();
    let text = message(&report.outcome);

    match &report.outcome {
        ProbeOutcome::Success(code) => {
            tracing::info!(status = code.as_u32(), elapsed_ms, "{text}");
        }
        ProbeOutcome::HttpFailure(code) => {
            tracing::warn!(status = code.as_u32(), elapsed_ms, "{text}");
        }
        ProbeOutcome::TransportFailure(e) => {
            tracing::warn!(stage, timeout = e.is_timeout(), elapsed_ms, "{text}");
        }
        ProbeOutcome::ValidationFailure(_) | ProbeOutcome::ParseFailure(_) => {
            tracing::warn!(stage, elapsed_ms, "{text}");
        }
    }
}

/// Machine-readable form of a report.
#[derive(Debug, Serialize)]
pub struct ReportLine<'a> {
    pub healthy: bool,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusCode>,
    pub stage: ProbeStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub elapsed_ms: u64,
    pub port: &'a str,
    pub path: &'a str,
}

impl<'a> ReportLine<'a> {
    pub fn new(report: &ProbeReport, config: &'a ProbeConfig) -> Self {
        let outcome = &report.outcome;
        Self {
            healthy: outcome.is_success(),
            outcome: outcome.kind(),
            status: outcome.status(),
            stage: report.last_stage,
            reason: (!outcome.is_success()).then(|| outcome.to_string()),
            elapsed_ms: report.elapsed.as_millis() as u64,
            port: &config.port,
            path: &config.path,
        }
    }
}

/// Render the report as one line of JSON.
pub fn json_line(report: &ProbeReport, config: &ProbeConfig) -> serde_json::Result<String> {
    serde_json::to_string(&ReportLine::new(report, config))
}
