//! Probe orchestration.
//!
//! # Responsibilities
//! - Walk the stage machine once: validate, connect, send, receive, parse
//! - Convert the first failure into the matching [`ProbeOutcome`]
//! - Release the connection before the report is handed back
//!
//! # Design Decisions
//! - Stage failures are converted with `From` so each step is a single `?`
//! - The connection is a local of `drive`; it is dropped on every return path

use std::time::Instant;

use crate::config::{validate_target, ProbeConfig};
use crate::health::outcome::{ProbeOutcome, ProbeReport};
use crate::health::state::ProbeStage;
use crate::http::{build_request, parse_status, ResponseReader, StatusCode};
use crate::net;

/// One probe invocation over a borrowed configuration.
#[derive(Debug)]
pub struct Probe<'a> {
    config: &'a ProbeConfig,
    stage: ProbeStage,
}

impl<'a> Probe<'a> {
    pub fn new(config: &'a ProbeConfig) -> Self {
        Self {
            config,
            stage: ProbeStage::Start,
        }
    }

    pub fn stage(&self) -> ProbeStage {
        self.stage
    }

    /// Run the probe to completion.
    pub async fn run(mut self) -> ProbeReport {
        let started = Instant::now();

        let outcome = match self.drive().await {
            Ok(code) => ProbeOutcome::from_status(code),
            Err(outcome) => outcome,
        };

        let last_stage = self.stage;
        self.enter(ProbeStage::Done);

        ProbeReport {
            outcome,
            last_stage,
            elapsed: started.elapsed(),
        }
    }

    async fn drive(&mut self) -> Result<StatusCode, ProbeOutcome> {
        let config = self.config;

        self.enter(ProbeStage::Validating);
        let target = validate_target(config)?;
        tracing::info!(
            url = %format!("http://localhost:{}/{}", target.port, target.path),
            "Health check"
        );

        self.enter(ProbeStage::Connecting);
        let mut connection =
            net::connect(config.host, target.port, config.connect_timeout, config.io_timeout).await?;

        self.enter(ProbeStage::Sending);
        let request = build_request(&target.path, target.port, config.request_capacity)?;
        connection.send(request.as_bytes()).await?;

        self.enter(ProbeStage::Receiving);
        let mut reader = ResponseReader::new(config.response_capacity);
        let io_timeout = connection.io_timeout();
        let bytes = reader
            .read_until_terminator_or_limit(connection.stream_mut(), io_timeout)
            .await?;

        self.enter(ProbeStage::Parsing);
        let code = parse_status(bytes)?;
        tracing::debug!(status = code.as_u32(), "HTTP status code");
        Ok(code)
    }

    fn enter(&mut self, next: ProbeStage) {
        debug_assert!(self.stage.can_advance_to(next), "{} -> {}", self.stage, next);
        tracing::debug!(from = %self.stage, to = %next, "Probe stage");
        self.stage = next;
    }
}

/// Probe the service described by `config`.
pub async fn probe(config: &ProbeConfig) -> ProbeReport {
    Probe::new(config).run().await
}
